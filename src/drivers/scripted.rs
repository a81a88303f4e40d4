//! In-memory drivers for driving an `Application` without a terminal.

use std::collections::VecDeque;
use std::io;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use super::{InputDriver, OutputDriver};
use crate::error::WindowError;
use crate::ui::RenderTarget;

/// Replays a fixed sequence of key presses, then reports end of input.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    keys: VecDeque<KeyEvent>,
}

impl ScriptedInput {
    pub fn new<I: IntoIterator<Item = KeyEvent>>(keys: I) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    /// Script of unmodified key codes.
    pub fn from_codes<I: IntoIterator<Item = KeyCode>>(codes: I) -> Self {
        Self::new(
            codes
                .into_iter()
                .map(|code| KeyEvent::new(code, KeyModifiers::NONE)),
        )
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl InputDriver for ScriptedInput {
    fn next_key(&mut self) -> io::Result<KeyEvent> {
        self.keys
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "key script exhausted"))
    }
}

/// Draws frames into an owned `Buffer` and counts them.
#[derive(Debug)]
pub struct BufferOutput {
    buffer: Buffer,
    frames: usize,
}

impl BufferOutput {
    pub fn new(area: Rect) -> Self {
        Self {
            buffer: Buffer::empty(area),
            frames: 0,
        }
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Text of row `y` of the last frame.
    pub fn row_text(&self, y: u16) -> String {
        let area = self.buffer.area;
        (area.x..area.x + area.width)
            .map(|x| self.buffer.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "))
            .collect()
    }

    pub fn lines(&self) -> Vec<String> {
        let area = self.buffer.area;
        (area.y..area.y + area.height)
            .map(|y| self.row_text(y))
            .collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }
}

impl OutputDriver for BufferOutput {
    fn enter(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn exit(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn area(&self) -> io::Result<Rect> {
        Ok(self.buffer.area)
    }

    fn draw<F>(&mut self, f: F) -> Result<(), WindowError>
    where
        F: FnOnce(&mut dyn RenderTarget) -> Result<(), WindowError>,
    {
        self.buffer.reset();
        f(&mut self.buffer)?;
        self.frames += 1;
        Ok(())
    }
}
