use crate::core::reader::SentenceReader;
use crate::core::synchronizer::TimeSynchronizer;
use crate::domain::model::{RenderMode, ZoneSelection};
use crate::domain::ports::{ByteSource, DisplaySink};
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// Drives the drain/select/render pipeline on a fixed cadence. Data errors
/// are logged and the schedule keeps going; only process shutdown (main
/// dropping the task) ends the loop.
pub struct ClockEngine<B: ByteSource, D: DisplaySink> {
    reader: SentenceReader<B>,
    synchronizer: TimeSynchronizer,
    display: D,
    zone: ZoneSelection,
    mode: RenderMode,
    period: Duration,
}

impl<B: ByteSource, D: DisplaySink> ClockEngine<B, D> {
    pub fn new(source: B, display: D, zone: ZoneSelection, mode: RenderMode) -> Self {
        Self {
            reader: SentenceReader::new(source),
            synchronizer: TimeSynchronizer::new(),
            display,
            zone,
            mode,
            period: Duration::from_secs(1),
        }
    }

    pub async fn run(&mut self) {
        let mut ticker = tokio::time::interval(self.period);
        // a cycle that overruns delays the next tick instead of compounding
        // missed ones
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            self.run_cycle();
        }
    }

    /// One synchronous tick. A failed read is reported and the cycle ends;
    /// the display keeps showing the last good time and the next tick will
    /// try the (possibly reconnected) receiver again.
    pub fn run_cycle(&mut self) {
        let records = match self.reader.drain() {
            Ok(records) => records,
            Err(e) => {
                tracing::error!("Byte source read failed: {}", e);
                return;
            }
        };

        if let Some(local) = self.synchronizer.tick(&records, &self.zone) {
            if let Err(e) = self.display.render(&local, self.mode) {
                tracing::error!("Display render failed: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::LocalizedTime;
    use crate::utils::error::{ClockError, Result};
    use std::sync::{Arc, Mutex};

    const REFERENCE_LINE: &[u8] =
        b"$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A\r\n";

    /// Emits the reference sentence on every poll, optionally failing on
    /// scripted cycles first.
    struct RepeatingSource {
        fail_first: usize,
        polls: usize,
    }

    impl ByteSource for RepeatingSource {
        fn bytes_available(&self) -> Result<usize> {
            Ok(REFERENCE_LINE.len())
        }

        fn read_available(&mut self, buf: &mut [u8]) -> Result<usize> {
            self.polls += 1;
            if self.polls <= self.fail_first {
                return Err(ClockError::IoError(std::io::Error::new(
                    std::io::ErrorKind::BrokenPipe,
                    "device unplugged",
                )));
            }
            let n = REFERENCE_LINE.len().min(buf.len());
            buf[..n].copy_from_slice(&REFERENCE_LINE[..n]);
            Ok(n)
        }
    }

    #[derive(Clone)]
    struct RecordingDisplay {
        frames: Arc<Mutex<Vec<LocalizedTime>>>,
    }

    impl RecordingDisplay {
        fn new() -> Self {
            Self {
                frames: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn frame_count(&self) -> usize {
            self.frames.lock().unwrap().len()
        }
    }

    impl DisplaySink for RecordingDisplay {
        fn render(&mut self, time: &LocalizedTime, _mode: RenderMode) -> Result<()> {
            self.frames.lock().unwrap().push(time.clone());
            Ok(())
        }
    }

    #[test]
    fn test_run_cycle_renders_on_valid_batch() {
        let display = RecordingDisplay::new();
        let mut engine = ClockEngine::new(
            RepeatingSource {
                fail_first: 0,
                polls: 0,
            },
            display.clone(),
            ZoneSelection::new("UTC"),
            RenderMode::Digital,
        );

        engine.run_cycle();
        assert_eq!(display.frame_count(), 1);

        let frames = display.frames.lock().unwrap();
        assert_eq!(frames[0].to_string(), "1994-03-23 12:35:19");
    }

    #[test]
    fn test_run_cycle_survives_read_failure() {
        let display = RecordingDisplay::new();
        let mut engine = ClockEngine::new(
            RepeatingSource {
                fail_first: 2,
                polls: 0,
            },
            display.clone(),
            ZoneSelection::new("UTC"),
            RenderMode::Digital,
        );

        // two failing cycles render nothing but do not stop anything
        engine.run_cycle();
        engine.run_cycle();
        assert_eq!(display.frame_count(), 0);

        engine.run_cycle();
        assert_eq!(display.frame_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_keeps_one_second_cadence() {
        let display = RecordingDisplay::new();
        let mut engine = ClockEngine::new(
            RepeatingSource {
                fail_first: 0,
                polls: 0,
            },
            display.clone(),
            ZoneSelection::new("UTC"),
            RenderMode::Digital,
        );

        let handle = tokio::spawn(async move { engine.run().await });

        // paused clock auto-advances: first tick fires immediately, then 1/s
        tokio::time::sleep(Duration::from_millis(3500)).await;
        handle.abort();

        assert_eq!(display.frame_count(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_keeps_ticking_through_read_failures() {
        let display = RecordingDisplay::new();
        let mut engine = ClockEngine::new(
            RepeatingSource {
                fail_first: 2,
                polls: 0,
            },
            display.clone(),
            ZoneSelection::new("UTC"),
            RenderMode::Digital,
        );

        let handle = tokio::spawn(async move { engine.run().await });

        tokio::time::sleep(Duration::from_millis(4500)).await;
        handle.abort();

        // ticks at 0s and 1s fail, 2s/3s/4s render
        assert_eq!(display.frame_count(), 3);
    }
}
