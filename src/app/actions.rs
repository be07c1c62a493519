use crate::lyrics::DisplayMode;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    TogglePause,
    SeekTo(f64),
    SeekForward,
    SeekBack,
    SetMode(DisplayMode),
    CycleMode,
}
