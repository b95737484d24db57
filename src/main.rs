extern crate getopts;
extern crate iforth;

use getopts::Options;
use iforth::core::Core;
use iforth::exception::Exception;
use iforth::loader::HasLoader;
use iforth::tools::Tools;
use iforth::vm::VM;
use std::env;
use std::process;

static DEFAULT_SOURCE: &'static str = "
( built-in demo )
: hello \"hello world\\n\" .s ;
hello
1 2 + .
";

#[cfg(not(test))]
fn main() {
    let args: Vec<String> = env::args().collect();
    let program = args[0].clone();
    let mut opts = Options::new();
    opts.optflag("h", "help", "print help menu");
    opts.optflag("v", "version", "print version number");

    let matches = match opts.parse(&args[1..]) {
        Ok(m) => m,
        Err(f) => {
            eprintln!("{}", f);
            process::exit(1);
        }
    };
    if matches.opt_present("h") {
        print_usage(&program, opts);
        return;
    }
    if matches.opt_present("v") {
        print_version();
        return;
    }

    let vm = &mut VM::new();
    if matches.free.is_empty() {
        vm.load_str(DEFAULT_SOURCE);
    } else if let Err(message) = vm.load(&matches.free) {
        eprintln!("{}", message);
        process::exit(1);
    }
    if let Some(Exception::UnrecognizedToken(pos, token)) = vm.last_error() {
        eprintln!("error at position {}: unrecognized token {}", pos, token);
        process::exit(1);
    }

    let code = vm.run();
    if let Some(e) = vm.last_error() {
        let token = vm.current_text().unwrap_or("<end of stream>").to_string();
        eprintln!("error interpreting token {}: {}", token, e);
        eprint!("{}", vm.dump_state());
        process::exit(1);
    }
    process::exit(code as i32);
}

fn print_version() {
    println!("iForth v{}", env!("CARGO_PKG_VERSION"));
}

#[cfg(not(test))]
fn print_usage(program: &str, opts: Options) {
    let brief = format!("Usage: {} [files] [options]", program);
    print!("{}", opts.usage(&brief));
}
