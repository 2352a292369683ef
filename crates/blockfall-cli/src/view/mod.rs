pub use self::canvas::TerminalCanvas;

mod canvas;
pub mod widgets;
