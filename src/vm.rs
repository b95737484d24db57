//! The virtual machine and its evaluator loop.

use std::collections::HashMap;

use core::{Core, Stack, State, Word};
use exception::Exception;
use lexer::{TokenKind, TokenStream};
use loader::HasLoader;
use output::Output;
use tools::Tools;

/// Virtual machine: exclusive owner of the token stream and all mutable
/// execution state for the duration of a run.
pub struct VM {
    tokens: TokenStream,
    state: State,
    s_stk: Stack<isize>,
    r_stk: Stack<isize>,
    dictionary: HashMap<String, usize>,
    labels: HashMap<String, usize>,
    wordlist: Vec<Word<VM>>,
    outbuf: Option<Vec<u8>>,
    last_error: Option<Exception>,
}

impl VM {
    pub fn new() -> VM {
        let mut vm = VM {
            tokens: TokenStream::default(),
            state: State::new(),
            s_stk: Stack::with_capacity(64),
            r_stk: Stack::with_capacity(64),
            dictionary: HashMap::new(),
            labels: HashMap::new(),
            wordlist: vec![],
            outbuf: Some(Vec::with_capacity(128)),
            last_error: None,
        };
        vm.add_core();
        vm.add_output();
        vm
    }

    /// Interpret the token at the instruction pointer. Every behavior
    /// advances the pointer (or branches) before returning.
    pub fn step(&mut self) {
        let kind = match self.current_kind() {
            Some(kind) => kind,
            None => return,
        };
        match kind {
            TokenKind::Comment => self.next(),
            TokenKind::StartDefinition => self.colon(),
            TokenKind::EndDefinition => self.exit(),
            TokenKind::Print => self.print_dispatch(),
            TokenKind::Identifier => self.interpret_identifier(),
            TokenKind::Number => self.interpret_number(),
            TokenKind::String => self.interpret_string(),
            TokenKind::Label => self.interpret_label(),
        }
    }

    /// Bare `.` prints a number; a payload selects the char, dump, drain
    /// or literal form.
    fn print_dispatch(&mut self) {
        let payload = match self.current_text() {
            Some(text) => text.as_bytes().get(1).copied(),
            None => None,
        };
        match payload {
            None => self.dot(),
            Some(b'"') => self.dot_quote(),
            Some(b'c') => self.dot_c(),
            Some(b'd') => self.dot_d(),
            // The lexer only admits `c`, `d`, `s` or a quote here.
            Some(_) => self.dot_s(),
        }
    }

    /// Run the evaluator loop without touching standard output. Program
    /// output accumulates in the output buffer.
    pub fn evaluate(&mut self) {
        while !self.at_end() && self.last_error().is_none() {
            self.step();
        }
    }

    /// Run to completion, flushing program output as it appears. Returns
    /// the exit code: top of the data stack, 0 when the stack is empty.
    pub fn run(&mut self) -> isize {
        while !self.at_end() && self.last_error().is_none() {
            self.step();
            self.flush_output();
        }
        self.s_stack().last().unwrap_or(0)
    }
}

impl Core for VM {
    fn tokens(&self) -> &TokenStream {
        &self.tokens
    }
    fn set_tokens(&mut self, tokens: TokenStream) {
        self.tokens = tokens;
    }
    fn state(&mut self) -> &mut State {
        &mut self.state
    }
    fn state_const(&self) -> &State {
        &self.state
    }
    fn s_stack(&mut self) -> &mut Stack<isize> {
        &mut self.s_stk
    }
    fn r_stack(&mut self) -> &mut Stack<isize> {
        &mut self.r_stk
    }
    fn dictionary(&self) -> &HashMap<String, usize> {
        &self.dictionary
    }
    fn dictionary_mut(&mut self) -> &mut HashMap<String, usize> {
        &mut self.dictionary
    }
    fn labels(&self) -> &HashMap<String, usize> {
        &self.labels
    }
    fn labels_mut(&mut self) -> &mut HashMap<String, usize> {
        &mut self.labels
    }
    fn wordlist(&self) -> &Vec<Word<VM>> {
        &self.wordlist
    }
    fn wordlist_mut(&mut self) -> &mut Vec<Word<VM>> {
        &mut self.wordlist
    }
    fn output_buffer(&mut self) -> &mut Option<Vec<u8>> {
        &mut self.outbuf
    }
    fn set_output_buffer(&mut self, buffer: Vec<u8>) {
        self.outbuf = Some(buffer);
    }
    fn last_error(&self) -> Option<Exception> {
        self.last_error.clone()
    }
    fn set_error(&mut self, e: Option<Exception>) {
        self.last_error = e;
    }
}

impl HasLoader for VM {}
impl Output for VM {}
impl Tools for VM {}
