/// Platform-agnostic pointer events delivered by the host's render views.
///
/// These are fed into
/// [`VirtualCursor::handle_event`](crate::cursor::VirtualCursor::handle_event)
/// together with the view the pointer is over.
///
/// # Example
///
/// ```ignore
/// let outcome = cursor.handle_event(
///     InputEvent::CursorMoved { x: 100.0, y: 200.0 },
///     Some(&hovered_view),
///     &mut marker,
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer moved within a render view.
    CursorMoved {
        /// Horizontal position in physical pixels, from the view's left
        /// edge.
        x: f32,
        /// Vertical position in physical pixels, from the view's top edge.
        y: f32,
    },
    /// Pointer left every render view.
    CursorLeft,
}
