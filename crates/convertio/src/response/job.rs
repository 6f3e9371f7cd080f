//! Payloads describing conversion jobs.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::types::{ConversionStep, JobId, JobStatus};

/// Payload of `POST /convert`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionCreated {
    /// Id of the new conversion.
    pub id: JobId,
    /// API conversion minutes available on the balance.
    pub minutes: u32,
}

/// Payload of `PUT /convert/{id}/{filename}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUploaded {
    pub id: JobId,
    /// Filename stored by the service.
    pub file: String,
    /// Size of the uploaded file in bytes.
    #[serde(with = "size_text")]
    pub size: u64,
}

/// Payload of `GET /convert/{id}/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionStatus {
    pub id: JobId,
    /// Current conversion step.
    pub step: ConversionStep,
    /// Progress of the current step, 0 to 100.
    #[serde(deserialize_with = "percent")]
    pub step_percent: u8,
    /// API minutes used by this conversion.
    pub minutes: u32,
    /// Output file information.
    pub output: ConversionOutput,
}

/// Output file of a conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// URL of the file to download.
    pub url: String,
    /// Size of the file in bytes.
    #[serde(with = "size_text")]
    pub size: u64,
    /// Individual files when the conversion produced several outputs, keyed
    /// by file name. Values are kept as sent by the service.
    ///
    /// In that case `url` points to a ZIP archive containing all of them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<BTreeMap<String, Value>>,
}

impl ConversionOutput {
    /// Returns `true` if the output consists of several files.
    pub fn is_multi_file(&self) -> bool {
        self.files.as_ref().is_some_and(|files| !files.is_empty())
    }
}

/// Entry of `POST /convert/list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobListEntry {
    pub id: JobId,
    pub status: JobStatus,
    /// API minutes used by this conversion.
    pub minutes: u32,
    /// Input format detected by the converter.
    #[serde(rename = "inputformat")]
    pub input_format: String,
    /// Output format requested by the user.
    #[serde(rename = "outputformat")]
    pub output_format: String,
    pub filename: String,
    /// Error message of a failed conversion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn percent<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let value = u8::deserialize(deserializer)?;
    if value > 100 {
        return Err(serde::de::Error::custom(format!(
            "invalid value: step_percent {value} exceeds 100"
        )));
    }
    Ok(value)
}

/// Byte sizes are sent as decimal strings; numbers are accepted too.
mod size_text {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Size {
        Text(String),
        Number(u64),
    }

    pub fn serialize<S: Serializer>(size: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(size)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        match Size::deserialize(deserializer)? {
            Size::Number(size) => Ok(size),
            Size::Text(text) => text.trim().parse().map_err(|_| {
                let message = format!("invalid value: size `{text}` is not a byte count");
                serde::de::Error::custom(message)
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_file_uploaded() {
        let data = json!({
            "id": "9712d01edc82e49c68d58ae6346d2013",
            "file": "test.bmp",
            "size": "1025470"
        });
        let uploaded: FileUploaded = serde_json::from_value(data.clone()).unwrap();
        assert_eq!(uploaded.size, 1_025_470);
        assert_eq!(serde_json::to_value(&uploaded).unwrap(), data);
    }

    #[test]
    fn test_size_accepts_number() {
        let output: ConversionOutput =
            serde_json::from_value(json!({"url": "http://out", "size": 36102})).unwrap();
        assert_eq!(output.size, 36102);
        assert!(!output.is_multi_file());
    }

    #[test]
    fn test_size_rejects_text() {
        let result =
            serde_json::from_value::<ConversionOutput>(json!({"url": "http://out", "size": "big"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_step_percent_bounded() {
        let result = serde_json::from_value::<ConversionStatus>(json!({
            "id": "abc",
            "step": "convert",
            "step_percent": 120,
            "minutes": 1,
            "output": {"url": "", "size": "0"}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_multi_file_output_keeps_values() {
        let data = json!({
            "url": "http://out/archive.zip",
            "size": "1024",
            "files": {"p1.jpg": 123, "p2.jpg": {"size": "4"}, "p3.jpg": "http://out/p3.jpg"}
        });
        let output: ConversionOutput = serde_json::from_value(data.clone()).unwrap();
        assert!(output.is_multi_file());

        let files = output.files.as_ref().unwrap();
        assert_eq!(files["p1.jpg"], json!(123));
        assert_eq!(files["p2.jpg"]["size"], "4");
        assert_eq!(serde_json::to_value(&output).unwrap(), data);
    }

    #[test]
    fn test_failed_step_parses() {
        let status: ConversionStatus = serde_json::from_value(json!({
            "id": "abc",
            "step": "failed",
            "step_percent": 0,
            "minutes": 0,
            "output": {"url": "", "size": "0"}
        }))
        .unwrap();
        assert!(status.step.is_failed());
    }

    #[test]
    fn test_unknown_step_rejected() {
        let result = serde_json::from_value::<ConversionStatus>(json!({
            "id": "abc",
            "step": "paused",
            "step_percent": 10,
            "minutes": 1,
            "output": {"url": "", "size": "0"}
        }));
        assert!(result.is_err());
    }
}
