#[derive(Debug, Clone)]
pub enum Event {
    Input(InputEvent),
    Player(PlayerEvent),
}

#[derive(Debug, Clone)]
pub enum InputEvent {
    /// One line typed on stdin
    Line(String),
    /// stdin reached end of file
    Closed,
}

#[derive(Debug, Clone)]
pub enum PlayerEvent {
    Tick,
}
