use log::info;
use panelpack_core::Frame;
use panelpack_desktop::preview::to_argb;

pub struct MinifbPlayer {
    window: minifb::Window,
    buffer: Vec<u32>,
    width: usize,
    height: usize,
}

impl MinifbPlayer {
    pub fn new(
        width: usize,
        height: usize,
        scale: minifb::Scale,
        fps: usize,
    ) -> Result<Self, minifb::Error> {
        let options = minifb::WindowOptions {
            borderless: false,
            title: true,
            resize: false,
            scale,
            ..minifb::WindowOptions::default()
        };
        let mut window = minifb::Window::new("Panel preview", width, height, options)?;
        window.set_target_fps(fps);
        info!("Playing {}x{} at {} fps", width, height, fps);
        Ok(Self {
            window,
            buffer: vec![0; width * height],
            width,
            height,
        })
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open() && !self.window.is_key_down(minifb::Key::Escape)
    }

    pub fn show(&mut self, frame: &Frame) -> Result<(), minifb::Error> {
        to_argb(frame, &mut self.buffer);
        self.window
            .update_with_buffer(&self.buffer, self.width, self.height)
    }
}
