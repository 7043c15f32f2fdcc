//! Input data handling for cache simulation
//!
//! Parses request traces from CSV files of the form `timestamp,key,size`.
//! A header row, blank lines and `#` comments are skipped. Columns after
//! `size` are ignored. Files are streamed one line at a time.

use crate::models::Request;
use std::error::Error;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::{Duration, UNIX_EPOCH};

/// Error types for log parsing
#[derive(Debug)]
pub enum LogParseError {
    /// Reading a trace file failed
    Io(io::Error),
    /// A line could not be parsed
    Parse {
        /// 1-based line number within its file
        line: usize,
        reason: String,
    },
}

impl fmt::Display for LogParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogParseError::Io(err) => write!(f, "I/O error: {err}"),
            LogParseError::Parse { line, reason } => write!(f, "line {line}: {reason}"),
        }
    }
}

impl Error for LogParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LogParseError::Io(err) => Some(err),
            LogParseError::Parse { .. } => None,
        }
    }
}

impl From<io::Error> for LogParseError {
    fn from(err: io::Error) -> Self {
        LogParseError::Io(err)
    }
}

/// Reader for cache request logs
#[derive(Debug)]
pub struct LogReader {
    input_dir: PathBuf,
}

impl LogReader {
    /// Create a new reader for the given input directory
    pub fn new<P: AsRef<Path>>(input_dir: P) -> Self {
        Self {
            input_dir: input_dir.as_ref().to_path_buf(),
        }
    }

    /// Get all trace files in the input directory, sorted by name
    pub fn get_log_files(&self) -> io::Result<Vec<PathBuf>> {
        let mut log_files = Vec::new();
        for entry in fs::read_dir(&self.input_dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if let Some(ext) = path.extension() {
                if ext == "log" || ext == "csv" || ext == "txt" {
                    log_files.push(path);
                }
            }
        }

        log_files.sort();
        Ok(log_files)
    }

    /// Parse a single line into a Request
    fn parse_line(line: &str, line_num: usize) -> Result<Option<Request>, LogParseError> {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') || (line_num == 0 && line.contains("timestamp"))
        {
            return Ok(None);
        }

        let parse_err = |reason: String| LogParseError::Parse {
            line: line_num + 1,
            reason,
        };

        let mut parts = line.splitn(4, ',');

        let ts_str = parts
            .next()
            .ok_or_else(|| parse_err("missing timestamp".to_string()))?;
        let timestamp = ts_str
            .trim()
            .parse::<u64>()
            .map_err(|_| parse_err(format!("invalid timestamp: {ts_str}")))?;
        let timestamp = UNIX_EPOCH + Duration::from_secs(timestamp);

        let key = parts
            .next()
            .ok_or_else(|| parse_err("missing key".to_string()))?
            .trim()
            .to_string();

        let size_str = parts
            .next()
            .ok_or_else(|| parse_err("missing size".to_string()))?;
        let size = size_str
            .trim()
            .parse::<u64>()
            .map_err(|_| parse_err(format!("invalid size: {size_str}")))?;

        Ok(Some(Request::new(timestamp, key, size)))
    }

    /// Create a streaming iterator over all requests in all trace files.
    pub fn stream_requests(&self) -> Result<RequestIterator, LogParseError> {
        let log_files = self.get_log_files()?;
        Ok(RequestIterator::new(log_files))
    }
}

/// Iterator that streams requests from multiple trace files without loading all into memory
#[derive(Debug)]
pub struct RequestIterator {
    files: Vec<PathBuf>,
    current_file_index: usize,
    current_reader: Option<BufReader<File>>,
    current_line_num: usize,
    line_buffer: String,
}

impl RequestIterator {
    fn new(files: Vec<PathBuf>) -> Self {
        Self {
            files,
            current_file_index: 0,
            current_reader: None,
            current_line_num: 0,
            line_buffer: String::with_capacity(256),
        }
    }

    /// Open the next file for reading
    fn open_next_file(&mut self) -> io::Result<bool> {
        if self.current_file_index >= self.files.len() {
            return Ok(false);
        }

        let file = File::open(&self.files[self.current_file_index])?;
        self.current_reader = Some(BufReader::with_capacity(1024 * 1024, file));
        self.current_line_num = 0;
        self.current_file_index += 1;
        Ok(true)
    }
}

impl Iterator for RequestIterator {
    type Item = Result<Request, LogParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current_reader.is_none() {
                match self.open_next_file() {
                    Ok(true) => {}
                    Ok(false) => return None,
                    Err(e) => return Some(Err(LogParseError::Io(e))),
                }
            }

            if let Some(reader) = &mut self.current_reader {
                self.line_buffer.clear();
                match reader.read_line(&mut self.line_buffer) {
                    Ok(0) => {
                        // EOF, move to next file
                        self.current_reader = None;
                        continue;
                    }
                    Ok(_) => {
                        let line_num = self.current_line_num;
                        self.current_line_num += 1;

                        match LogReader::parse_line(&self.line_buffer, line_num) {
                            Ok(Some(request)) => return Some(Ok(request)),
                            Ok(None) => continue,
                            Err(e) => return Some(Err(e)),
                        }
                    }
                    Err(e) => return Some(Err(LogParseError::Io(e))),
                }
            }
        }
    }
}
