use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use embassy_time::{Duration, Timer};
use embedded_graphics::pixelcolor::RgbColor;
use ww_common::*;

/// Renders frames to the terminal with 24-bit ANSI colors.
pub struct TerminalMatrix {
    last: Option<Frame>,
}

impl TerminalMatrix {
    pub fn new() -> Self {
        Self { last: None }
    }
}

impl MatrixDisplay for TerminalMatrix {
    type Error = io::Error;

    fn show(&mut self, frame: &Frame) -> Result<(), Self::Error> {
        if self.last.as_ref() == Some(frame) {
            return Ok(());
        }

        let mut out = io::stdout().lock();
        // cursor home, then redraw in place
        write!(out, "\x1b[H")?;
        for row in frame.rows() {
            for c in row {
                write!(out, "\x1b[48;2;{};{};{}m  ", c.r(), c.g(), c.b())?;
            }
            writeln!(out, "\x1b[0m")?;
        }
        out.flush()?;

        self.last = Some(frame.clone());
        Ok(())
    }
}

/// Joystick fed from stdin: `w a s d` for directions, `e` for enter.
///
/// Each key press is reported as held for exactly one tick.
pub struct StdinJoystick {
    presses: Receiver<InputEvent>,
}

impl StdinJoystick {
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                for c in line.chars() {
                    let event = match c {
                        'w' => InputEvent::Up,
                        'a' => InputEvent::Left,
                        's' => InputEvent::Down,
                        'd' => InputEvent::Right,
                        'e' | ' ' => InputEvent::Enter,
                        _ => continue,
                    };
                    if tx.send(event).is_err() {
                        return;
                    }
                }
            }
        });
        info!("Joystick: w/a/s/d + e, then Enter");
        Self { presses: rx }
    }
}

impl Joystick for StdinJoystick {
    type Error = TryRecvError;

    fn sample(&mut self) -> Result<ButtonSample, Self::Error> {
        match self.presses.try_recv() {
            Ok(event) => Ok(ButtonSample::only(event)),
            Err(TryRecvError::Empty) => Ok(ButtonSample::RELEASED),
            Err(e) => Err(e),
        }
    }
}

/// Temperature that wanders around a base value; humidity is constant.
pub struct SimulatedSensor {
    base: f32,
    step: u32,
    temperature: Option<f32>,
}

impl SimulatedSensor {
    pub fn new(base: f32) -> Self {
        Self {
            base,
            step: 0,
            temperature: None,
        }
    }
}

impl EnvironmentSensor for SimulatedSensor {
    type Error = core::convert::Infallible;

    async fn refresh(&mut self) -> Result<(), Self::Error> {
        self.step = self.step.wrapping_add(1);
        let swing = (self.step % 40) as f32;
        let swing = if swing < 20.0 { swing } else { 40.0 - swing };
        self.temperature = Some(self.base + (swing - 10.0) * 0.4);
        Ok(())
    }

    fn temperature(&self) -> Option<f32> {
        self.temperature
    }

    fn humidity(&self) -> Option<f32> {
        self.temperature.map(|_| 45.0)
    }
}

/// Cloud stand-in: every sent message comes back as an inbound acknowledgement.
pub struct LoopbackTelegraph {
    inbox: RefCell<VecDeque<String>>,
    sent: Cell<u32>,
}

impl LoopbackTelegraph {
    pub fn new() -> Self {
        Self {
            inbox: RefCell::new(VecDeque::new()),
            sent: Cell::new(0),
        }
    }
}

impl Telegraph for LoopbackTelegraph {
    type Error = core::convert::Infallible;

    async fn send(&self, text: &str) -> Result<(), Self::Error> {
        let n = self.sent.get() + 1;
        self.sent.set(n);
        info!("[telegraph] -> {}", text);
        self.inbox
            .borrow_mut()
            .push_back(format!("ack {}: {}", n, text));
        Ok(())
    }

    async fn receive(&self) -> Result<Option<String>, Self::Error> {
        Ok(self.inbox.borrow_mut().pop_front())
    }
}

const SAMPLE_FORECAST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<weatherdata>
  <location><name>Ottawa</name><country>CA</country></location>
  <sun rise="2024-01-01T11:00:00" set="2024-01-01T23:00:00"/>
  <forecast>
    <time from="2024-01-01T12:00:00" to="2024-01-01T15:00:00">
      <symbol number="802" name="scattered clouds" var="03d"/>
      <temperature unit="celsius" value="21.3" min="14.5" max="23.5"/>
    </time>
  </forecast>
</weatherdata>"#;

/// Serves a canned forecast (or the file named by `WW_FORECAST_FILE`)
/// after a short delay.
pub struct CannedForecastSource {
    body: String,
    latency: Duration,
}

impl CannedForecastSource {
    pub fn new(latency: Duration) -> Self {
        let body = std::env::var("WW_FORECAST_FILE")
            .ok()
            .and_then(|path| match std::fs::read_to_string(&path) {
                Ok(body) => Some(body),
                Err(e) => {
                    warn!("Cannot read {}: {}, using sample forecast", path, e);
                    None
                }
            })
            .unwrap_or_else(|| SAMPLE_FORECAST.to_string());
        Self { body, latency }
    }
}

impl ForecastSource for CannedForecastSource {
    type Error = core::convert::Infallible;

    async fn get(&mut self, url: &str) -> Result<String, Self::Error> {
        info!("Simulated GET {}", url);
        Timer::after(self.latency).await;
        Ok(self.body.clone())
    }
}
