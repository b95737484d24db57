//! Output word set: the print tokens, string literals and `cr`.
//!
//! Print behaviors append raw bytes to the machine's output buffer; the
//! run loop (or a host embedding the library) decides when to flush the
//! buffer to standard output. Tests read the buffer directly.

use std::io::{self, Write};

use core::Core;
use exception::Exception;

pub trait Output: Core {
    /// Add output primitives.
    fn add_output(&mut self) {
        self.add_primitive("cr", Output::cr);
    }

    /// Write the buffered output to standard output and empty the buffer.
    fn flush_output(&mut self) {
        if let Some(mut buffer) = self.output_buffer().take() {
            if !buffer.is_empty() {
                let stdout = io::stdout();
                let mut handle = stdout.lock();
                let _ = handle.write_all(&buffer);
                let _ = handle.flush();
                buffer.clear();
            }
            self.set_output_buffer(buffer);
        }
    }

    /// Run-time: ( -- )
    ///
    /// Emit a newline.
    fn cr(&mut self) {
        if let Some(mut buffer) = self.output_buffer().take() {
            buffer.push(b'\n');
            self.set_output_buffer(buffer);
        }
        self.next();
    }

    /// Run-time: ( n -- )
    ///
    /// Emit n as a decimal followed by a newline.
    fn dot(&mut self) {
        match self.s_stack().pop() {
            Some(n) => {
                if let Some(mut buffer) = self.output_buffer().take() {
                    writeln!(buffer, "{}", n).unwrap();
                    self.set_output_buffer(buffer);
                }
                self.next();
            }
            None => self.abort_with(Exception::StackUnderflow),
        }
    }

    /// Run-time: ( c -- )
    ///
    /// Emit the low byte of c, no newline.
    fn dot_c(&mut self) {
        match self.s_stack().pop() {
            Some(c) => {
                if let Some(mut buffer) = self.output_buffer().take() {
                    buffer.push(c as u8);
                    self.set_output_buffer(buffer);
                }
                self.next();
            }
            None => self.abort_with(Exception::StackUnderflow),
        }
    }

    /// Run-time: ( 0 chars… -- )
    ///
    /// Pop and emit bytes until the null terminator is popped.
    fn dot_s(&mut self) {
        if self.drain_string() {
            self.next();
        }
    }

    /// Run-time for `."…"`: push the literal, then drain it to output.
    fn dot_quote(&mut self) {
        let quoted = match self.current_text() {
            Some(text) => text[1..].to_string(),
            None => return,
        };
        self.push_string(&quoted);
        if self.drain_string() {
            self.next();
        }
    }

    /// Evaluate a string literal token and step past it.
    fn interpret_string(&mut self) {
        let quoted = match self.current_text() {
            Some(text) => text.to_string(),
            None => return,
        };
        self.push_string(&quoted);
        self.next();
    }

    /// Build the null-terminated stack layout for a quoted literal: a
    /// zero, then the payload bytes pushed last-to-first with escapes
    /// resolved along the way, so popping yields the de-escaped string
    /// front to back.
    fn push_string(&mut self, quoted: &str) {
        let bytes = quoted.as_bytes();
        self.s_stack().push(0);
        if bytes.len() < 2 {
            return;
        }
        for i in (1..bytes.len() - 1).rev() {
            let c = bytes[i];
            if c == b'\\' {
                match self.s_stack().pop() {
                    Some(x) if x == b'n' as isize => self.s_stack().push(b'\n' as isize),
                    Some(x) if x == b'r' as isize => self.s_stack().push(b'\r' as isize),
                    Some(x) if x == b't' as isize => self.s_stack().push(b'\t' as isize),
                    Some(x) if x == b'"' as isize => self.s_stack().push(b'"' as isize),
                    Some(x) if x == b'\\' as isize => self.s_stack().push(b'\\' as isize),
                    Some(_) => {
                        // Any other escape swallows the escaped character.
                    }
                    None => self.s_stack().push(b'\\' as isize),
                }
            } else {
                self.s_stack().push(c as isize);
            }
        }
    }

    /// Pop bytes into the output buffer until a zero is popped. False
    /// when the stack ran out before the terminator.
    fn drain_string(&mut self) -> bool {
        let mut buffer = self.output_buffer().take();
        loop {
            match self.s_stack().pop() {
                Some(0) => break,
                Some(c) => {
                    if let Some(ref mut buf) = buffer {
                        buf.push(c as u8);
                    }
                }
                None => {
                    if let Some(buf) = buffer {
                        self.set_output_buffer(buf);
                    }
                    self.abort_with(Exception::PrintStringMissingNullTerminator);
                    return false;
                }
            }
        }
        if let Some(buf) = buffer {
            self.set_output_buffer(buf);
        }
        true
    }
}
