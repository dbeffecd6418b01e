use std::{
    env,
    ffi::OsString,
    path::{Path, PathBuf},
    process::ExitCode,
};

use pof::{PofReader, ToleratedGap};

/// The input path if the argument names a regular file, otherwise the
/// rejected argument.
fn input_path(arg: Option<OsString>) -> Result<PathBuf, OsString> {
    match arg {
        Some(arg) if !arg.is_empty() && Path::new(&arg).is_file() => Ok(arg.into()),
        other => Err(other.unwrap_or_default()),
    }
}

pub fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let path = match input_path(env::args_os().nth(1)) {
        Ok(path) => path,
        Err(arg) => {
            log::error!("missing file : {}", arg.to_string_lossy());
            return ExitCode::from(1);
        }
    };

    let mut reader = match PofReader::open(&path) {
        Ok(reader) => reader,
        Err(e) => panic!("{}: {e}", path.display()),
    };
    let model = match reader.read_model() {
        Ok(model) => model,
        Err(e) => panic!("{}: {e}", path.display()),
    };

    println!("{}", path.display());
    println!("{}", model.summary());

    for ToleratedGap { tag, position, next } in reader.tolerated_gaps() {
        println!("skipped {} bytes after {tag} at {position}", next - position);
    }

    ExitCode::SUCCESS
}
