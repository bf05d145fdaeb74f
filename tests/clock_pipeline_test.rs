use gps_clock::domain::ports::{ByteSource, DisplaySink};
use gps_clock::utils::error::Result;
use gps_clock::{
    ClockEngine, LocalizedTime, RenderMode, SentenceReader, TimeSynchronizer, TomlConfig,
    ZoneSelection,
};
use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const REFERENCE_RMC: &str =
    "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A";

/// One scripted chunk per poll, the way a serial buffer fills up between
/// ticks. An exhausted script reads as a silent receiver, not an error.
struct ScriptedSource {
    chunks: VecDeque<Vec<u8>>,
}

impl ScriptedSource {
    fn new(chunks: &[&[u8]]) -> Self {
        Self {
            chunks: chunks.iter().map(|c| c.to_vec()).collect(),
        }
    }
}

impl ByteSource for ScriptedSource {
    fn bytes_available(&self) -> Result<usize> {
        Ok(self.chunks.front().map(|c| c.len()).unwrap_or(0))
    }

    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize> {
        match self.chunks.pop_front() {
            Some(chunk) => {
                let n = chunk.len().min(buf.len());
                buf[..n].copy_from_slice(&chunk[..n]);
                Ok(n)
            }
            None => Ok(0),
        }
    }
}

#[derive(Clone)]
struct RecordingDisplay {
    frames: Arc<Mutex<Vec<(LocalizedTime, RenderMode)>>>,
}

impl RecordingDisplay {
    fn new() -> Self {
        Self {
            frames: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn snapshot(&self) -> Vec<(LocalizedTime, RenderMode)> {
        self.frames.lock().unwrap().clone()
    }
}

impl DisplaySink for RecordingDisplay {
    fn render(&mut self, time: &LocalizedTime, mode: RenderMode) -> Result<()> {
        self.frames.lock().unwrap().push((time.clone(), mode));
        Ok(())
    }
}

#[test]
fn test_reader_to_synchronizer_end_to_end() {
    // one noisy burst: encoding garbage, an irrelevant type, the reference
    // RMC and a later RMC that must not override it
    let burst = [
        b"\xff\xfenoise\r\n".as_slice(),
        b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n",
        b"$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A\r\n",
        b"$GPRMC,134455,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*65\r\n",
    ]
    .concat();

    let mut reader = SentenceReader::new(ScriptedSource::new(&[&burst]));
    let mut sync = TimeSynchronizer::new();
    let zone = ZoneSelection::new("UTC");

    let records = reader.drain().unwrap();
    assert_eq!(records.len(), 3); // garbage line dropped

    let local = sync.tick(&records, &zone).unwrap();
    assert_eq!(local.to_string(), "1994-03-23 12:35:19");
}

#[test]
fn test_partial_line_completes_on_a_later_cycle() {
    // the reference sentence arrives split across two polls
    let (head, tail) = REFERENCE_RMC.as_bytes().split_at(30);
    let tail_line = [tail, b"\r\n"].concat();

    let source = ScriptedSource::new(&[head, &tail_line]);
    let display = RecordingDisplay::new();
    let mut engine = ClockEngine::new(
        source,
        display.clone(),
        ZoneSelection::new("UTC"),
        RenderMode::Digital,
    );

    // first cycle only buffers the fragment; nothing to show yet
    engine.run_cycle();
    assert!(display.snapshot().is_empty());

    engine.run_cycle();
    let frames = display.snapshot();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].0.to_string(), "1994-03-23 12:35:19");
}

#[test]
fn test_display_holds_when_ticks_run_dry() {
    let line = [REFERENCE_RMC.as_bytes(), b"\r\n"].concat();
    let source = ScriptedSource::new(&[&line]);
    let display = RecordingDisplay::new();
    let mut engine = ClockEngine::new(
        source,
        display.clone(),
        ZoneSelection::new("UTC"),
        RenderMode::Digital,
    );

    engine.run_cycle();
    assert_eq!(display.snapshot().len(), 1);

    // silent receiver from here on: no new frames, last one stands
    engine.run_cycle();
    engine.run_cycle();
    assert_eq!(display.snapshot().len(), 1);
}

#[test]
fn test_zone_change_applies_on_the_next_cycle() {
    let line = [REFERENCE_RMC.as_bytes(), b"\r\n"].concat();
    let source = ScriptedSource::new(&[&line, &line]);
    let display = RecordingDisplay::new();
    let zone = ZoneSelection::new("UTC");
    let mut engine = ClockEngine::new(source, display.clone(), zone.clone(), RenderMode::Digital);

    engine.run_cycle();
    zone.set("Asia/Tokyo");
    engine.run_cycle();

    let frames = display.snapshot();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].0.hour, 12);
    assert_eq!(frames[1].0.hour, 21);
    assert_eq!(frames[1].0.zone, "Asia/Tokyo");
}

#[test]
fn test_render_mode_reaches_the_display_untouched() {
    let line = [REFERENCE_RMC.as_bytes(), b"\r\n"].concat();
    let source = ScriptedSource::new(&[&line]);
    let display = RecordingDisplay::new();
    let mut engine = ClockEngine::new(
        source,
        display.clone(),
        ZoneSelection::new("UTC"),
        RenderMode::Analog,
    );

    engine.run_cycle();
    let frames = display.snapshot();
    assert_eq!(frames[0].1, RenderMode::Analog);
}

#[tokio::test(start_paused = true)]
async fn test_engine_ticks_once_per_second_end_to_end() {
    let line = [REFERENCE_RMC.as_bytes(), b"\r\n"].concat();
    // a fresh sentence for each of the first three ticks, then silence
    let source = ScriptedSource::new(&[&line, &line, &line]);
    let display = RecordingDisplay::new();
    let mut engine = ClockEngine::new(
        source,
        display.clone(),
        ZoneSelection::new("UTC"),
        RenderMode::Digital,
    );

    let handle = tokio::spawn(async move { engine.run().await });
    tokio::time::sleep(Duration::from_millis(5500)).await;
    handle.abort();

    // renders only while sentences kept coming
    assert_eq!(display.snapshot().len(), 3);
}

#[test]
fn test_config_file_feeds_the_zone_selection() {
    let mut temp_file = tempfile::NamedTempFile::new().unwrap();
    temp_file
        .write_all(
            br#"
[serial]
port = "/dev/ttyUSB0"

[clock]
time_zone = "America/New_York"
"#,
        )
        .unwrap();

    let config = TomlConfig::from_file(temp_file.path()).unwrap();
    let zone = ZoneSelection::new(config.time_zone().unwrap());

    // spring-forward instant projects onto the post-transition offset
    let spring = "$GPRMC,070000,A,4043.000,N,07400.000,W,000.0,000.0,100324,013.0,W*77"
        .to_string();
    let mut sync = TimeSynchronizer::new();
    let local = sync.tick(&[spring], &zone).unwrap();

    assert_eq!(local.to_string(), "2024-03-10 03:00:00");
    assert_eq!(local.zone, "America/New_York");
}
