//! JUnit XML report parsing
//!
//! Produces the normalized [`Outcome`] list consumed by the aggregator.
//! Accepts either a `<testsuites>` document or a single bare `<testsuite>`.
//!
//! ```xml
//! <testsuite name="s" tests="2">
//!   <testcase classname="auth" name="test_login" time="0.5"/>
//!   <testcase classname="auth" name="test_token" time="1.2">
//!     <failure message="timeout waiting">connection timed out</failure>
//!   </testcase>
//! </testsuite>
//! ```
//!
//! Only `<failure>` marks an execution as failed. `<error>` and `<skipped>`
//! children are ignored, so such executions count as passes.

use crate::outcome::{Failure, Outcome, TestIdentity};
use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs;
use std::path::Path;
use thiserror::Error;

const TESTSUITES_TAG: &[u8] = b"testsuites";
const TESTSUITE_TAG: &[u8] = b"testsuite";
const TESTCASE_TAG: &[u8] = b"testcase";
const FAILURE_TAG: &[u8] = b"failure";

/// Errors raised while reading a JUnit report
#[derive(Debug, Error)]
pub enum JunitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Malformed attribute: {0}")]
    Attr(#[from] AttrError),

    #[error("Unexpected root element <{0}>, expected <testsuites> or <testsuite>")]
    UnexpectedRoot(String),

    #[error("Document has no root element")]
    MissingRoot,

    #[error("<testsuites> contains no <testsuite>")]
    NoTestsuites,

    #[error("Invalid time {value:?} for test {test}")]
    InvalidTime { test: String, value: String },
}

/// A `<testcase>` whose closing tag has not been seen yet
#[derive(Debug)]
struct PendingCase {
    identity: TestIdentity,
    duration_s: f64,
    failure: Option<Failure>,
}

impl PendingCase {
    fn from_start(start: &BytesStart) -> Result<Self, JunitError> {
        let mut name = String::new();
        let mut class = String::new();
        let mut time = None;

        for attr in start.attributes() {
            let attr = attr?;
            let value = attr.unescape_value()?;
            match attr.key.as_ref() {
                b"name" => name = value.into_owned(),
                b"classname" => class = value.into_owned(),
                b"time" => time = Some(value.into_owned()),
                _ => {}
            }
        }

        let identity = TestIdentity::new(class, name);
        let duration_s = match time {
            Some(raw) => parse_time(&identity, &raw)?,
            None => 0.0,
        };

        Ok(Self {
            identity,
            duration_s,
            failure: None,
        })
    }

    fn finish(self) -> Outcome {
        Outcome {
            identity: self.identity,
            duration_s: self.duration_s,
            failure: self.failure,
        }
    }
}

fn parse_time(identity: &TestIdentity, raw: &str) -> Result<f64, JunitError> {
    match raw.trim().parse::<f64>() {
        Ok(secs) if secs.is_finite() && secs >= 0.0 => Ok(secs),
        _ => Err(JunitError::InvalidTime {
            test: identity.to_string(),
            value: raw.to_string(),
        }),
    }
}

fn failure_from_start(start: &BytesStart) -> Result<Failure, JunitError> {
    let mut failure = Failure::default();
    for attr in start.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"message" {
            failure.message = attr.unescape_value()?.into_owned();
        }
    }
    Ok(failure)
}

/// Returns true when the root is the `<testsuites>` wrapper
fn check_root(start: &BytesStart) -> Result<bool, JunitError> {
    match start.name().as_ref() {
        TESTSUITES_TAG => Ok(true),
        TESTSUITE_TAG => Ok(false),
        other => Err(JunitError::UnexpectedRoot(
            String::from_utf8_lossy(other).into_owned(),
        )),
    }
}

/// Parse a JUnit XML document into outcomes, in document order
pub fn parse_str(xml: &str) -> Result<Vec<Outcome>, JunitError> {
    let mut reader = Reader::from_str(xml);
    let mut outcomes = Vec::new();
    let mut root_seen = false;
    let mut wrapped = false;
    let mut suite_seen = false;
    let mut case: Option<PendingCase> = None;
    let mut in_failure = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if !root_seen {
                    wrapped = check_root(&e)?;
                    root_seen = true;
                    continue;
                }
                match e.name().as_ref() {
                    TESTSUITE_TAG => suite_seen = true,
                    TESTCASE_TAG => case = Some(PendingCase::from_start(&e)?),
                    FAILURE_TAG => {
                        if let Some(case) = case.as_mut() {
                            case.failure = Some(failure_from_start(&e)?);
                            in_failure = true;
                        }
                    }
                    _ => {}
                }
            }
            Event::Empty(e) => {
                if !root_seen {
                    wrapped = check_root(&e)?;
                    root_seen = true;
                    continue;
                }
                match e.name().as_ref() {
                    TESTSUITE_TAG => suite_seen = true,
                    TESTCASE_TAG => outcomes.push(PendingCase::from_start(&e)?.finish()),
                    FAILURE_TAG => {
                        if let Some(case) = case.as_mut() {
                            case.failure = Some(failure_from_start(&e)?);
                        }
                    }
                    _ => {}
                }
            }
            Event::Text(text) if in_failure => {
                if let Some(failure) = case.as_mut().and_then(|c| c.failure.as_mut()) {
                    failure.body.push_str(&text.unescape()?);
                }
            }
            Event::CData(data) if in_failure => {
                if let Some(failure) = case.as_mut().and_then(|c| c.failure.as_mut()) {
                    failure
                        .body
                        .push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::End(e) => match e.name().as_ref() {
                FAILURE_TAG => in_failure = false,
                TESTCASE_TAG => {
                    if let Some(case) = case.take() {
                        outcomes.push(case.finish());
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    if !root_seen {
        return Err(JunitError::MissingRoot);
    }
    if wrapped && !suite_seen {
        return Err(JunitError::NoTestsuites);
    }
    Ok(outcomes)
}

/// Read and parse a JUnit XML file
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<Outcome>, JunitError> {
    let content = fs::read_to_string(path)?;
    parse_str(&content)
}
