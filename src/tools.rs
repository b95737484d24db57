//! Debugging aids: the `.d` machine-state dump.

use std::fmt::Write;

use core::Core;

pub trait Tools: Core {
    /// Run-time for `.d`: append the machine-state dump to program
    /// output.
    fn dot_d(&mut self) {
        let dump = self.dump_state();
        if let Some(mut buffer) = self.output_buffer().take() {
            buffer.extend_from_slice(dump.as_bytes());
            self.set_output_buffer(buffer);
        }
        self.next();
    }

    /// Render the token stream, both stacks and the instruction pointer.
    /// Also attached to every error diagnostic.
    fn dump_state(&mut self) -> String {
        let mut out = String::new();
        out.push_str("========= machine state =========\n");
        out.push_str("token stream:\n");
        for addr in 0..self.tokens().len() {
            if let Some(text) = self.tokens().slice(addr) {
                write!(out, "{}:[{}] ", addr, text).unwrap();
            }
        }
        out.push_str("\n\ndata stack:\n");
        write_stack(&mut out, self.s_stack().as_slice());
        out.push_str("\nreturn stack:\n");
        write_stack(&mut out, self.r_stack().as_slice());
        write!(out, "\nip: {} ", self.ip()).unwrap();
        match self.current_text() {
            Some(text) => writeln!(out, "({})", text).unwrap(),
            None => out.push('\n'),
        }
        out.push_str("=================================\n");
        out
    }
}

/// Deepest cell first, each labeled with its distance from the top.
fn write_stack(out: &mut String, cells: &[isize]) {
    out.push('[');
    for (i, v) in cells.iter().enumerate() {
        let idx = cells.len() - i - 1;
        write!(out, "{}:{}", idx, v).unwrap();
        if idx != 0 {
            out.push(' ');
        }
    }
    out.push_str("]\n");
}
