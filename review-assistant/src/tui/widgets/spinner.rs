// Braille spinner shown next to in-flight actions.

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Render ticks per spinner frame (~100ms at the 33ms render rate).
const TICKS_PER_FRAME: usize = 3;

/// Spinner glyph for the given render tick.
pub fn frame(tick: usize) -> &'static str {
    FRAMES[(tick / TICKS_PER_FRAME) % FRAMES.len()]
}
