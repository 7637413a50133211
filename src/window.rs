//! SDL2 window acting as a real-time frame driver.
//!
//! The window owns a streaming ARGB8888 texture the size of the viewport.
//! Every frame the application draws into a [`Canvas`], whose pixels are
//! uploaded to the texture and presented.

use log::{debug, info};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;

use crate::driver::Application;
use crate::input::{InputState, Key};
use crate::render::Canvas;

pub const FPS: u64 = 60;
pub const FRAME_TARGET_TIME: f64 = 1000.0 / FPS as f64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    None,
    Quit,
    Resize(u32, u32),
}

pub struct FrameLimiter {
    previous_frame_time: u64,
}

impl FrameLimiter {
    pub fn new(window: &Window) -> Self {
        Self {
            previous_frame_time: window.timer().ticks64(),
        }
    }

    /// Waits if necessary to maintain frame rate and returns the delta time in milliseconds.
    /// Delta time represents the time elapsed since the last call to this method.
    pub fn wait_and_get_delta(&mut self, window: &Window) -> u64 {
        let mut current_time = window.timer().ticks64();
        let mut delta_time = current_time - self.previous_frame_time;

        if delta_time < FRAME_TARGET_TIME as u64 {
            let time_to_wait = (FRAME_TARGET_TIME as u64) - delta_time;
            std::thread::sleep(std::time::Duration::from_millis(time_to_wait));
            current_time = window.timer().ticks64();
            delta_time = current_time - self.previous_frame_time;
        }

        self.previous_frame_time = current_time;
        delta_time
    }
}

fn map_key(keycode: Keycode) -> Option<Key> {
    match keycode {
        Keycode::W => Some(Key::W),
        Keycode::A => Some(Key::A),
        Keycode::S => Some(Key::S),
        Keycode::D => Some(Key::D),
        Keycode::Space => Some(Key::Space),
        Keycode::LShift | Keycode::RShift => Some(Key::Shift),
        Keycode::Escape => Some(Key::Escape),
        _ => None,
    }
}

pub struct Window {
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    // Declared before texture_creator so it is dropped first.
    texture: sdl2::render::Texture<'static>,
    texture_creator: Box<sdl2::render::TextureCreator<sdl2::video::WindowContext>>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    width: u32,
    height: u32,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let timer_subsystem = sdl_context.timer()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump()?;

        // SAFETY: texture_creator is heap-allocated and lives as long as Window.
        // Field order drops texture before texture_creator.
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(texture_creator.as_ref() as *const _) };
        let texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())?;

        Ok(Self {
            canvas,
            texture,
            texture_creator,
            event_pump,
            timer_subsystem,
            width,
            height,
        })
    }

    /// Drain pending events into `input`. Returns the most significant
    /// window-level event seen.
    pub fn poll_events(&mut self, input: &mut InputState) -> WindowEvent {
        let mut result = WindowEvent::None;
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => return WindowEvent::Quit,
                Event::Window {
                    win_event: sdl2::event::WindowEvent::Resized(w, h),
                    ..
                } => result = WindowEvent::Resize(w as u32, h as u32),
                Event::KeyDown {
                    keycode: Some(keycode),
                    ..
                } => {
                    if let Some(key) = map_key(keycode) {
                        input.press(key);
                    }
                }
                Event::KeyUp {
                    keycode: Some(keycode),
                    ..
                } => {
                    if let Some(key) = map_key(keycode) {
                        input.release(key);
                    }
                }
                Event::MouseMotion { xrel, yrel, .. } => {
                    input.move_pointer(xrel as f32, yrel as f32);
                }
                _ => {}
            }
        }
        result
    }

    pub fn present(&mut self, frame: &Canvas) -> Result<(), String> {
        self.texture
            .update(None, &frame.to_argb_bytes(), (self.width * 4) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas
            .copy(&self.texture, None, Some(Rect::new(0, 0, self.width, self.height)))?;
        self.canvas.present();
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), String> {
        self.width = width;
        self.height = height;
        // SAFETY: Same as in new() - texture_creator outlives texture
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(self.texture_creator.as_ref() as *const _) };
        self.texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())?;
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn timer(&self) -> &sdl2::TimerSubsystem {
        &self.timer_subsystem
    }

    /// Run `app` until the window is closed or Escape is pressed.
    pub fn run<A: Application + ?Sized>(&mut self, app: &mut A) -> Result<(), String> {
        let mut frame = Canvas::new(self.width, self.height);
        let mut input = InputState::new();
        let mut limiter = FrameLimiter::new(self);

        app.init();
        info!("Window loop started at {}x{}", self.width, self.height);

        loop {
            match self.poll_events(&mut input) {
                WindowEvent::Quit => break,
                WindowEvent::Resize(w, h) => {
                    self.resize(w, h)?;
                    frame.resize(w, h);
                }
                WindowEvent::None => {}
            }

            let delta = limiter.wait_and_get_delta(self) as f32 / 1000.0;
            if let Err(e) = app.update(delta, &input, &mut frame) {
                // Minimized windows report a zero-sized viewport; skip the frame.
                debug!("Frame skipped: {}", e);
                input.end_frame();
                continue;
            }
            input.end_frame();

            self.present(&frame)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_shift_keys_map_to_shift() {
        assert_eq!(map_key(Keycode::LShift), Some(Key::Shift));
        assert_eq!(map_key(Keycode::RShift), Some(Key::Shift));
        assert_eq!(map_key(Keycode::Q), None);
    }
}
