//! # Laser Redis
//!
//! This crate delivers scan messages through a Redis list, one JSON-encoded
//! `ScanMessage` per element. Producers push to the tail, the sampling node
//! pops from the head.
use anyhow::{Context, Result};
use laser_core::ScanMessage;
use redis::{Commands, Connection};
use serde::{de::DeserializeOwned, Serialize};

// --- Key Builders ---

pub fn scan_queue_key(topic: &str) -> String {
    format!("scan:queue:{}", topic)
}

// --- Generic Encoding Helpers ---

fn encode<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

fn decode<T: DeserializeOwned>(json_string: &str) -> Result<T> {
    Ok(serde_json::from_str(json_string)?)
}

// --- Queue Functions ---

pub fn push_scan(con: &mut Connection, topic: &str, scan: &ScanMessage) -> Result<()> {
    let key = scan_queue_key(topic);
    con.rpush::<_, _, ()>(&key, encode(scan)?)?;
    Ok(())
}

/// Decode one queue element, keeping the raw payload in the error.
fn decode_scan(key: &str, json_string: &str) -> Result<ScanMessage> {
    decode(json_string)
        .with_context(|| format!("decoding scan popped from {}: {}", key, json_string))
}

/// Pop the oldest queued scan, or `None` if the queue is empty.
///
/// `LPOP` removes the element before it is decoded. A malformed payload is
/// gone from the queue once this returns an error; the error message carries
/// the raw payload so it can be recovered from the log.
pub fn pop_scan(con: &mut Connection, topic: &str) -> Result<Option<ScanMessage>> {
    let key = scan_queue_key(topic);
    let json_string: Option<String> = con.lpop(&key, None)?;
    json_string
        .as_deref()
        .map(|json| decode_scan(&key, json))
        .transpose()
}

pub fn queue_len(con: &mut Connection, topic: &str) -> Result<usize> {
    let key = scan_queue_key(topic);
    Ok(con.llen::<_, usize>(&key)?)
}

pub fn clear_queue(con: &mut Connection, topic: &str) -> Result<()> {
    let key = scan_queue_key(topic);
    con.del::<_, ()>(&key)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use redis::Client;

    // NOTE: The queue tests require a running Redis server on the default port (6379).
    // Run them with `cargo test -- --ignored`.

    fn get_redis_connection() -> Connection {
        let client = Client::open("redis://127.0.0.1/").unwrap();
        client.get_connection().unwrap()
    }

    #[test]
    fn test_key_builders() {
        assert_eq!(scan_queue_key("scan"), "scan:queue:scan");
        assert_eq!(scan_queue_key("front/lidar"), "scan:queue:front/lidar");
    }

    #[test]
    fn test_decode_full_laser_scan_payload() {
        let json = r#"{"header":{"frame_id":"laser"},"range_min":0.1,"ranges":[1.0,2.5]}"#;
        let scan: ScanMessage = decode(json).unwrap();
        assert_eq!(scan.ranges, vec![1.0, 2.5]);
    }

    #[test]
    fn test_decode_rejects_missing_ranges() {
        assert!(decode::<ScanMessage>(r#"{"angle_min":0.0}"#).is_err());
    }

    #[test]
    fn test_decode_error_keeps_raw_payload() {
        let key = scan_queue_key("scan");
        let err = decode_scan(&key, r#"{"ranges":[1.0,"#).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("scan:queue:scan"));
        assert!(message.contains(r#"{"ranges":[1.0,"#));
    }

    #[test]
    #[ignore]
    fn test_scan_queue_is_fifo() {
        let mut con = get_redis_connection();
        let topic = "test-fifo";
        clear_queue(&mut con, topic).unwrap();

        let first = ScanMessage::new(vec![1.0, 2.0]);
        let second = ScanMessage::uniform(360, 3.0);
        push_scan(&mut con, topic, &first).unwrap();
        push_scan(&mut con, topic, &second).unwrap();
        assert_eq!(queue_len(&mut con, topic).unwrap(), 2);

        assert_eq!(pop_scan(&mut con, topic).unwrap(), Some(first));
        assert_eq!(pop_scan(&mut con, topic).unwrap(), Some(second));
        assert_eq!(pop_scan(&mut con, topic).unwrap(), None);
    }

    #[test]
    #[ignore]
    fn test_clear_queue() {
        let mut con = get_redis_connection();
        let topic = "test-clear";
        push_scan(&mut con, topic, &ScanMessage::new(vec![0.5])).unwrap();
        clear_queue(&mut con, topic).unwrap();
        assert_eq!(queue_len(&mut con, topic).unwrap(), 0);
    }
}
