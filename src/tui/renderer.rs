use crate::engine::session::Frame;
use crate::error::Result;

pub(crate) trait Renderer {
    fn size_hint(&self) -> Result<(u16, u16)>;
    fn render(&mut self, frame: &Frame) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
    /// Give the terminal back to the user after a failure.
    fn recover(&mut self);
}
