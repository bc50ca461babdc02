use std::process::ExitCode;

use lzw16_app::Mode;

fn main() -> ExitCode {
    lzw16_app::main(Mode::Compress)
}
