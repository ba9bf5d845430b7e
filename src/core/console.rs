// blazestd - core/console.rs
//
// Console output and scanf-style input for compiled Blaze programs.
//
// Input follows scanf conventions: numeric readers skip leading whitespace
// and leave everything after the number (including the newline) in the
// stream; `input_char` reads the very next character; `input_string` reads
// the rest of the current line and consumes its newline.
//
// All helpers are generic over `Write` / `BufRead` so they can be driven by
// in-memory buffers in tests. `Console` binds them to the process streams.

use crate::core::format::{self, Value};
use crate::util::constants;
use crate::util::error::ConsoleError;
use std::io::{self, BufRead, Write};

// =============================================================================
// Output
// =============================================================================

/// Format `fmt` with `args` and write it to `out`.
///
/// Returns the number of bytes written.
pub fn print<W: Write>(out: &mut W, fmt: &str, args: &[Value]) -> Result<usize, ConsoleError> {
    let text = format::format(fmt, args)?;
    write_all(out, text.as_bytes(), "print")?;
    Ok(text.len())
}

/// Like [`print`], followed by a newline.
pub fn println<W: Write>(out: &mut W, fmt: &str, args: &[Value]) -> Result<usize, ConsoleError> {
    let mut text = format::format(fmt, args)?;
    text.push('\n');
    write_all(out, text.as_bytes(), "println")?;
    Ok(text.len())
}

/// Report `message` on the error stream.
///
/// Returns the exit status a program terminating on this error uses.
/// A failure to write is logged; the status is returned regardless.
pub fn error<W: Write>(err: &mut W, message: &str) -> i32 {
    if let Err(e) = writeln!(err, "{message}").and_then(|_| err.flush()) {
        tracing::warn!(error = %e, "Failed to write error message");
    }
    constants::EXIT_FAILURE
}

/// Exit status for the `exit(code)` built-in.
///
/// The code must be an `Int` that fits a process status.
pub fn exit_code(code: &Value) -> Result<i32, ConsoleError> {
    match code {
        Value::Int(v) => i32::try_from(*v).map_err(|_| ConsoleError::ExitCode {
            found: v.to_string(),
        }),
        other => Err(ConsoleError::ExitCode {
            found: other.type_name().to_string(),
        }),
    }
}

fn write_all<W: Write>(out: &mut W, bytes: &[u8], operation: &'static str) -> Result<(), ConsoleError> {
    out.write_all(bytes)
        .and_then(|_| out.flush())
        .map_err(|source| ConsoleError::Io { operation, source })
}

// =============================================================================
// Input
// =============================================================================

/// Read a decimal integer (`%d`).
pub fn input_int<R: BufRead>(input: &mut R) -> Result<i64, ConsoleError> {
    let mut scan = Scanner::new(input, "integer");
    scan.skip_whitespace()?;
    let mut text = String::new();
    scan.take_sign(&mut text)?;
    scan.take_digits(&mut text)?;

    if !text.bytes().any(|b| b.is_ascii_digit()) {
        return Err(scan.parse_error(text)?);
    }
    text.parse::<i64>().map_err(|_| ConsoleError::Parse {
        expected: "integer",
        found: text.clone(),
    })
}

/// Read a decimal floating-point number (`%f`).
///
/// Accepts an optional sign, digits with an optional fraction, and an
/// optional exponent. An exponent marker without digits is ignored.
pub fn input_float<R: BufRead>(input: &mut R) -> Result<f64, ConsoleError> {
    let mut scan = Scanner::new(input, "float");
    scan.skip_whitespace()?;
    let mut text = String::new();
    scan.take_sign(&mut text)?;
    let int_digits = scan.take_digits(&mut text)?;
    let mut frac_digits = 0;
    if scan.peek()? == Some(b'.') {
        scan.bump();
        text.push('.');
        frac_digits = scan.take_digits(&mut text)?;
    }
    if int_digits + frac_digits == 0 {
        return Err(scan.parse_error(text)?);
    }

    if matches!(scan.peek()?, Some(b'e' | b'E')) {
        scan.bump();
        let mut exp = String::from("e");
        scan.take_sign(&mut exp)?;
        if scan.take_digits(&mut exp)? > 0 {
            text.push_str(&exp);
        }
    }

    text.parse::<f64>().map_err(|_| ConsoleError::Parse {
        expected: "float",
        found: text.clone(),
    })
}

/// Read exactly one character (`%c`), whitespace included.
pub fn input_char<R: BufRead>(input: &mut R) -> Result<char, ConsoleError> {
    let mut scan = Scanner::new(input, "character");
    let first = scan.peek()?.ok_or(ConsoleError::Eof {
        expected: "character",
    })?;
    scan.bump();

    let width = utf8_width(first);
    let mut bytes = vec![first];
    for _ in 1..width {
        match scan.peek()? {
            Some(b) if b & 0xC0 == 0x80 => {
                bytes.push(b);
                scan.bump();
            }
            _ => break,
        }
    }
    Ok(String::from_utf8_lossy(&bytes)
        .chars()
        .next()
        .unwrap_or(char::REPLACEMENT_CHARACTER))
}

/// Read the rest of the current line (`%[^\n]%*c`).
///
/// The newline is consumed but not returned. The result is truncated to
/// `max_len` characters; the remainder of the line is discarded.
pub fn input_string<R: BufRead>(input: &mut R, max_len: usize) -> Result<String, ConsoleError> {
    let mut line = Vec::new();
    let read = input
        .read_until(b'\n', &mut line)
        .map_err(|source| ConsoleError::Io {
            operation: "input_string",
            source,
        })?;
    if read == 0 {
        return Err(ConsoleError::Eof { expected: "string" });
    }

    if line.last() == Some(&b'\n') {
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
    }
    let text = String::from_utf8_lossy(&line);
    let count = text.chars().count();
    if count > max_len {
        tracing::debug!(count, max_len, "Truncating input line");
        return Ok(text.chars().take(max_len).collect());
    }
    Ok(text.into_owned())
}

/// Byte length of the UTF-8 sequence introduced by `first`.
fn utf8_width(first: u8) -> usize {
    match first {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}

/// Byte-at-a-time cursor over a `BufRead` with one byte of lookahead.
struct Scanner<'a, R: BufRead> {
    input: &'a mut R,
    expected: &'static str,
}

impl<'a, R: BufRead> Scanner<'a, R> {
    fn new(input: &'a mut R, expected: &'static str) -> Self {
        Self { input, expected }
    }

    fn peek(&mut self) -> Result<Option<u8>, ConsoleError> {
        loop {
            match self.input.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => {
                    return Err(ConsoleError::Io {
                        operation: "input",
                        source,
                    })
                }
            }
        }
    }

    fn bump(&mut self) {
        self.input.consume(1);
    }

    /// Skip whitespace; end of input here is an `Eof` error.
    fn skip_whitespace(&mut self) -> Result<(), ConsoleError> {
        loop {
            match self.peek()? {
                Some(b) if b.is_ascii_whitespace() => self.bump(),
                Some(_) => return Ok(()),
                None => {
                    return Err(ConsoleError::Eof {
                        expected: self.expected,
                    })
                }
            }
        }
    }

    fn take_sign(&mut self, text: &mut String) -> Result<(), ConsoleError> {
        if let Some(b @ (b'+' | b'-')) = self.peek()? {
            text.push(char::from(b));
            self.bump();
        }
        Ok(())
    }

    /// Append consecutive ASCII digits to `text`; returns how many.
    fn take_digits(&mut self, text: &mut String) -> Result<usize, ConsoleError> {
        let mut count = 0;
        while let Some(b) = self.peek()? {
            if !b.is_ascii_digit() {
                break;
            }
            text.push(char::from(b));
            self.bump();
            count += 1;
        }
        Ok(count)
    }

    /// Error for a token that does not start a number.
    ///
    /// The offending character is left in the stream.
    fn parse_error(&mut self, consumed: String) -> Result<ConsoleError, ConsoleError> {
        let mut found = consumed;
        match self.peek()? {
            Some(b) => found.push(char::from(b)),
            None if found.is_empty() => {
                return Ok(ConsoleError::Eof {
                    expected: self.expected,
                })
            }
            None => {}
        }
        Ok(ConsoleError::Parse {
            expected: self.expected,
            found,
        })
    }
}

// =============================================================================
// Process console
// =============================================================================

/// The console a Blaze program talks to: an input, an output, and an
/// error stream, plus the configured `input_string` limit.
pub struct Console<R, W, E> {
    input: R,
    output: W,
    error: E,
    max_string_len: usize,
}

impl Console<io::StdinLock<'static>, io::Stdout, io::Stderr> {
    /// Console bound to the process stdin, stdout, and stderr.
    pub fn stdio(max_string_len: usize) -> Self {
        Self::new(io::stdin().lock(), io::stdout(), io::stderr(), max_string_len)
    }
}

impl<R: BufRead, W: Write, E: Write> Console<R, W, E> {
    pub fn new(input: R, output: W, error: E, max_string_len: usize) -> Self {
        Self {
            input,
            output,
            error,
            max_string_len,
        }
    }

    pub fn print(&mut self, fmt: &str, args: &[Value]) -> Result<usize, ConsoleError> {
        print(&mut self.output, fmt, args)
    }

    pub fn println(&mut self, fmt: &str, args: &[Value]) -> Result<usize, ConsoleError> {
        println(&mut self.output, fmt, args)
    }

    pub fn error(&mut self, message: &str) -> i32 {
        error(&mut self.error, message)
    }

    pub fn input_int(&mut self) -> Result<i64, ConsoleError> {
        input_int(&mut self.input)
    }

    pub fn input_float(&mut self) -> Result<f64, ConsoleError> {
        input_float(&mut self.input)
    }

    pub fn input_char(&mut self) -> Result<char, ConsoleError> {
        input_char(&mut self.input)
    }

    pub fn input_string(&mut self) -> Result<String, ConsoleError> {
        input_string(&mut self.input, self.max_string_len)
    }

    /// The output stream, for writers that do not go through `print`.
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Give back the underlying streams.
    pub fn into_parts(self) -> (R, W, E) {
        (self.input, self.output, self.error)
    }
}
