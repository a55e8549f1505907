//! Terminal implementation of the core `Platform`: frame pacing, input
//! polling and presentation.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};

use crate::core::types::{InputEvent, TICK_MS};
use crate::core::{Platform, Scene};
use crate::fb::FrameBuffer;
use crate::input::map_event;
use crate::renderer::TerminalRenderer;
use crate::view::{StageView, Viewport};

pub struct TerminalPlatform {
    renderer: TerminalRenderer,
    view: StageView,
    fb: FrameBuffer,
    viewport: Viewport,
    tick: Duration,
    last_frame: Instant,
    invalidated: bool,
}

impl TerminalPlatform {
    pub fn new(view: StageView, viewport: Viewport) -> Self {
        Self {
            renderer: TerminalRenderer::new(),
            view,
            fb: FrameBuffer::new(viewport.width, viewport.height),
            viewport,
            tick: Duration::from_millis(TICK_MS as u64),
            last_frame: Instant::now(),
            invalidated: false,
        }
    }

    pub fn enter(&mut self, title: &str) -> Result<()> {
        self.renderer.enter(title)?;
        self.last_frame = Instant::now();
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.renderer.exit()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn on_event(&mut self, ev: Event, events: &mut Vec<InputEvent>) {
        if let Event::Resize(w, h) = ev {
            log::debug!("terminal resized to {}x{}", w, h);
            self.viewport = Viewport::new(w, h);
            self.renderer.invalidate();
            self.invalidated = true;
        }
        if let Some(input) = map_event(ev) {
            events.push(input);
        }
    }
}

impl Platform for TerminalPlatform {
    /// Poll until the tick deadline; anything already queued when the
    /// deadline passes is still collected for this frame.
    fn next_frame(&mut self, events: &mut Vec<InputEvent>) -> Result<u32> {
        let deadline = self.last_frame + self.tick;
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            let ev = event::read()?;
            self.on_event(ev, events);
            if Instant::now() >= deadline {
                while event::poll(Duration::ZERO)? {
                    let ev = event::read()?;
                    self.on_event(ev, events);
                }
                break;
            }
        }

        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;
        Ok(elapsed.as_millis().min(u32::MAX as u128) as u32)
    }

    fn present(&mut self, scene: &Scene<'_>) -> Result<()> {
        self.view.render_into(scene, self.viewport, &mut self.fb);
        self.renderer.draw_swap(&mut self.fb)
    }

    fn take_invalidated(&mut self) -> bool {
        std::mem::take(&mut self.invalidated)
    }
}
