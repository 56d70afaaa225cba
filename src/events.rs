//! Host events, listener registration and winit translation.
//!
//! Window events are first translated into [`HostEvent`]s, which carry
//! logical-pixel values and an absolute scroll offset. Those are queued on an
//! [`EventSource`] and drained through an [`EventDispatcher`] into every
//! registered [`Listener`]. Tests push synthetic events onto an
//! [`EventQueue`] and drain it the same way.

use std::collections::VecDeque;

use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{MouseScrollDelta, WindowEvent};

use crate::input::PointerSampler;
use crate::scroll::ScrollHandler;
use crate::state::AppState;
use crate::viewport::ResizeHandler;

/// Logical pixels scrolled per wheel line.
pub const LINE_SCROLL_PX: f32 = 100.0;

/// An input or window change, in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostEvent {
    Resized {
        width: f32,
        height: f32,
        device_pixel_ratio: f32,
    },
    PointerMoved {
        x: f32,
        y: f32,
    },
    /// Absolute vertical scroll offset (never a delta).
    Scrolled {
        offset_y: f32,
    },
}

/// Something that reacts to host events by writing into the app state.
pub trait Listener {
    fn on_event(&mut self, event: &HostEvent, state: &mut AppState);
}

/// A source of pending host events.
pub trait EventSource {
    fn next_event(&mut self) -> Option<HostEvent>;
}

/// FIFO of pending events.
#[derive(Default, Debug)]
pub struct EventQueue {
    pending: VecDeque<HostEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: HostEvent) {
        self.pending.push_back(event);
    }
}

impl EventSource for EventQueue {
    fn next_event(&mut self) -> Option<HostEvent> {
        self.pending.pop_front()
    }
}

/// Fans events out to listeners in registration order.
#[derive(Default)]
pub struct EventDispatcher {
    listeners: Vec<Box<dyn Listener>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer sampling, scroll translation and resize handling.
    pub fn with_default_listeners() -> Self {
        let mut dispatcher = Self::new();
        dispatcher
            .subscribe(PointerSampler)
            .subscribe(ScrollHandler)
            .subscribe(ResizeHandler);
        dispatcher
    }

    pub fn subscribe<L: Listener + 'static>(&mut self, listener: L) -> &mut Self {
        self.listeners.push(Box::new(listener));
        self
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn dispatch(&mut self, event: &HostEvent, state: &mut AppState) {
        for listener in &mut self.listeners {
            listener.on_event(event, state);
        }
    }

    /// Dispatches every pending event in order; returns how many ran.
    pub fn drain(&mut self, source: &mut dyn EventSource, state: &mut AppState) -> usize {
        let mut count = 0;
        while let Some(event) = source.next_event() {
            self.dispatch(&event, state);
            count += 1;
        }
        count
    }
}

/// Converts winit window events into [`HostEvent`]s.
///
/// Tracks the scale factor and physical size so it can report logical
/// sizes, and accumulates wheel deltas into an absolute scroll offset in
/// `[0, max_scroll]`.
#[derive(Debug)]
pub struct WindowEventTranslator {
    scale_factor: f64,
    physical_size: PhysicalSize<u32>,
    scroll_offset: f32,
    max_scroll: f32,
}

impl WindowEventTranslator {
    pub fn new(physical_size: PhysicalSize<u32>, scale_factor: f64, max_scroll: f32) -> Self {
        Self {
            scale_factor,
            physical_size,
            scroll_offset: 0.0,
            max_scroll: max_scroll.max(0.0),
        }
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn translate(&mut self, event: &WindowEvent) -> Option<HostEvent> {
        match event {
            WindowEvent::Resized(size) => Some(self.resized(*size)),
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                Some(self.scale_factor_changed(*scale_factor))
            }
            WindowEvent::CursorMoved { position, .. } => Some(self.cursor_moved(*position)),
            WindowEvent::MouseWheel { delta, .. } => self.wheel(*delta),
            _ => None,
        }
    }

    pub fn resized(&mut self, size: PhysicalSize<u32>) -> HostEvent {
        self.physical_size = size;
        self.current_size()
    }

    pub fn scale_factor_changed(&mut self, scale_factor: f64) -> HostEvent {
        self.scale_factor = scale_factor;
        self.current_size()
    }

    pub fn cursor_moved(&self, position: PhysicalPosition<f64>) -> HostEvent {
        let logical = position.to_logical::<f64>(self.scale_factor);
        HostEvent::PointerMoved {
            x: logical.x as f32,
            y: logical.y as f32,
        }
    }

    /// Returns `None` when the offset is already pinned at the limit the
    /// wheel is pushing towards.
    pub fn wheel(&mut self, delta: MouseScrollDelta) -> Option<HostEvent> {
        let dy = match delta {
            MouseScrollDelta::LineDelta(_, lines) => lines * LINE_SCROLL_PX,
            MouseScrollDelta::PixelDelta(pos) => (pos.y / self.scale_factor) as f32,
        };
        // Wheel up (positive) scrolls towards the top of the page.
        let offset = (self.scroll_offset - dy).clamp(0.0, self.max_scroll);
        if offset == self.scroll_offset {
            return None;
        }
        self.scroll_offset = offset;
        Some(HostEvent::Scrolled { offset_y: offset })
    }

    fn current_size(&self) -> HostEvent {
        let logical = self.physical_size.to_logical::<f64>(self.scale_factor);
        HostEvent::Resized {
            width: logical.width as f32,
            height: logical.height as f32,
            device_pixel_ratio: self.scale_factor as f32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::viewport::Viewport;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder(Rc<RefCell<Vec<HostEvent>>>);

    impl Listener for Recorder {
        fn on_event(&mut self, event: &HostEvent, _state: &mut AppState) {
            self.0.borrow_mut().push(*event);
        }
    }

    fn state() -> AppState {
        AppState::new(&AppConfig::default(), Viewport::new(800.0, 600.0, 1.0, 2.0))
    }

    #[test]
    fn drain_delivers_in_fifo_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = EventDispatcher::new();
        dispatcher.subscribe(Recorder(Rc::clone(&seen)));

        let mut queue = EventQueue::new();
        queue.push(HostEvent::PointerMoved { x: 1.0, y: 2.0 });
        queue.push(HostEvent::Scrolled { offset_y: 30.0 });

        let mut state = state();
        assert_eq!(dispatcher.drain(&mut queue, &mut state), 2);
        assert!(queue.next_event().is_none());
        assert_eq!(
            *seen.borrow(),
            vec![
                HostEvent::PointerMoved { x: 1.0, y: 2.0 },
                HostEvent::Scrolled { offset_y: 30.0 },
            ]
        );
    }

    #[test]
    fn default_listeners_route_every_event_kind() {
        let mut dispatcher = EventDispatcher::with_default_listeners();
        assert_eq!(dispatcher.listener_count(), 3);

        let mut state = state();
        let mut queue = EventQueue::new();
        queue.push(HostEvent::PointerMoved { x: 500.0, y: 200.0 });
        queue.push(HostEvent::Scrolled { offset_y: 250.0 });
        queue.push(HostEvent::Resized {
            width: 1000.0,
            height: 500.0,
            device_pixel_ratio: 1.0,
        });
        dispatcher.drain(&mut queue, &mut state);

        assert_eq!(state.pointer, glam::Vec2::new(100.0, -100.0));
        assert!((state.scene.sphere.transform.position.y - 0.25).abs() < 1e-6);
        assert_eq!(state.scene.camera.aspect, 2.0);
    }

    #[test]
    fn resize_reports_logical_size_and_ratio() {
        let mut translator = WindowEventTranslator::new(PhysicalSize::new(800, 600), 2.0, 1000.0);
        let event = translator.translate(&WindowEvent::Resized(PhysicalSize::new(1600, 1200)));
        assert_eq!(
            event,
            Some(HostEvent::Resized {
                width: 800.0,
                height: 600.0,
                device_pixel_ratio: 2.0,
            })
        );
    }

    #[test]
    fn scale_change_reuses_last_physical_size() {
        let mut translator = WindowEventTranslator::new(PhysicalSize::new(1200, 900), 1.0, 1000.0);
        assert_eq!(
            translator.scale_factor_changed(3.0),
            HostEvent::Resized {
                width: 400.0,
                height: 300.0,
                device_pixel_ratio: 3.0,
            }
        );
    }

    #[test]
    fn cursor_positions_become_logical() {
        let translator = WindowEventTranslator::new(PhysicalSize::new(800, 600), 2.0, 1000.0);
        assert_eq!(
            translator.cursor_moved(PhysicalPosition::new(300.0, 100.0)),
            HostEvent::PointerMoved { x: 150.0, y: 50.0 }
        );
    }

    #[test]
    fn wheel_accumulates_absolute_offset() {
        let mut translator = WindowEventTranslator::new(PhysicalSize::new(800, 600), 1.0, 1000.0);

        // Wheel down twice.
        translator.wheel(MouseScrollDelta::LineDelta(0.0, -1.0));
        let event = translator.wheel(MouseScrollDelta::LineDelta(0.0, -1.5));
        assert_eq!(event, Some(HostEvent::Scrolled { offset_y: 250.0 }));

        // Back up by pixels.
        let event = translator.wheel(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 50.0)));
        assert_eq!(event, Some(HostEvent::Scrolled { offset_y: 200.0 }));
    }

    #[test]
    fn wheel_is_clamped_to_page_bounds() {
        let mut translator = WindowEventTranslator::new(PhysicalSize::new(800, 600), 1.0, 300.0);

        assert_eq!(translator.wheel(MouseScrollDelta::LineDelta(0.0, 2.0)), None);
        assert_eq!(translator.scroll_offset(), 0.0);

        let event = translator.wheel(MouseScrollDelta::LineDelta(0.0, -10.0));
        assert_eq!(event, Some(HostEvent::Scrolled { offset_y: 300.0 }));
        assert_eq!(translator.wheel(MouseScrollDelta::LineDelta(0.0, -1.0)), None);
    }
}
