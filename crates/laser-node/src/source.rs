//! Scan sources
//!
//! A source delivers one scan message per call until it runs dry. The node
//! pulls from it until the sampler reports terminal.

use std::io::BufRead;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use laser_core::ScanMessage;
use laser_redis::pop_scan;
use log::trace;
use redis::{Client, Connection};

pub trait ScanSource {
    /// Next scan message, or `None` once the source has no more to give.
    fn next_scan(&mut self) -> Result<Option<ScanMessage>>;
}

/// JSON scan messages, one per line. Blank lines are skipped.
pub struct JsonLinesSource<R> {
    reader: R,
    line_no: usize,
    buf: String,
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            buf: String::new(),
        }
    }
}

impl<R: BufRead> ScanSource for JsonLinesSource<R> {
    fn next_scan(&mut self) -> Result<Option<ScanMessage>> {
        loop {
            self.buf.clear();
            let read = self
                .reader
                .read_line(&mut self.buf)
                .with_context(|| format!("reading scan line {}", self.line_no + 1))?;
            if read == 0 {
                return Ok(None);
            }
            self.line_no += 1;

            let line = self.buf.trim();
            if line.is_empty() {
                continue;
            }
            let scan = serde_json::from_str(line)
                .with_context(|| format!("decoding scan message on line {}", self.line_no))?;
            return Ok(Some(scan));
        }
    }
}

/// Polls a Redis scan queue, sleeping while it is empty. Never runs dry.
pub struct RedisSource {
    con: Connection,
    topic: String,
    poll_interval: Duration,
}

impl RedisSource {
    pub fn connect(redis_url: &str, topic: &str, poll_interval: Duration) -> Result<Self> {
        let client = Client::open(redis_url)
            .with_context(|| format!("opening redis client for {redis_url}"))?;
        let con = client
            .get_connection()
            .with_context(|| format!("connecting to {redis_url}"))?;
        Ok(Self {
            con,
            topic: topic.to_string(),
            poll_interval,
        })
    }
}

impl ScanSource for RedisSource {
    fn next_scan(&mut self) -> Result<Option<ScanMessage>> {
        loop {
            if let Some(scan) = pop_scan(&mut self.con, &self.topic)? {
                return Ok(Some(scan));
            }
            trace!("scan queue '{}' empty, waiting", self.topic);
            thread::sleep(self.poll_interval);
        }
    }
}

/// Replays a fixed list of scans. Used for synthetic runs and tests.
pub struct ReplaySource {
    scans: std::vec::IntoIter<ScanMessage>,
}

impl ReplaySource {
    pub fn new(scans: Vec<ScanMessage>) -> Self {
        Self {
            scans: scans.into_iter(),
        }
    }
}

impl ScanSource for ReplaySource {
    fn next_scan(&mut self) -> Result<Option<ScanMessage>> {
        Ok(self.scans.next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn json_lines_skips_blank_lines() {
        let input = "{\"ranges\":[1.0,2.0]}\n\n   \n{\"ranges\":[3.0]}\n";
        let mut source = JsonLinesSource::new(Cursor::new(input));

        assert_eq!(source.next_scan().unwrap(), Some(ScanMessage::new(vec![1.0, 2.0])));
        assert_eq!(source.next_scan().unwrap(), Some(ScanMessage::new(vec![3.0])));
        assert_eq!(source.next_scan().unwrap(), None);
    }

    #[test]
    fn json_lines_reports_bad_line_number() {
        let input = "{\"ranges\":[1.0]}\nnot json\n";
        let mut source = JsonLinesSource::new(Cursor::new(input));
        source.next_scan().unwrap();

        let err = source.next_scan().unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn replay_source_runs_dry() {
        let mut source = ReplaySource::new(vec![ScanMessage::uniform(2, 1.0)]);
        assert!(source.next_scan().unwrap().is_some());
        assert!(source.next_scan().unwrap().is_none());
    }
}
