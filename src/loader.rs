//! Building the source buffer for a run.

use std::fs::File;
use std::io::{self, Read};

use core::Core;

pub trait HasLoader: Core {
    /// Lex `script` directly, as the host's in-memory source.
    fn load_str(&mut self, script: &str) {
        self.set_source(script);
    }

    /// Read the named sources, concatenate them in argument order and lex
    /// the result as one buffer. `-` reads standard input.
    fn load(&mut self, paths: &[String]) -> Result<(), String> {
        let mut text = String::new();
        for path in paths {
            if path == "-" {
                if let Err(e) = io::stdin().read_to_string(&mut text) {
                    return Err(format!("couldn't read standard input: {}", e));
                }
            } else {
                let mut file = match File::open(path) {
                    Ok(file) => file,
                    Err(_) => return Err(format!("couldn't open file {}", path)),
                };
                if let Err(e) = file.read_to_string(&mut text) {
                    return Err(format!("couldn't read file {}: {}", path, e));
                }
            }
        }
        self.load_str(&text);
        Ok(())
    }
}
