use std::fs;
use std::path::Path;
use std::process::ExitCode;

use colored::Colorize;

use jsimports::args::parse_args;
use jsimports::paths::absolutize;
use jsimports::{ModuleFile, Project, VERSION};

fn usage() -> &'static str {
    "jsimports - regenerates dependency headers for AMD/RequireJS modules\n\n\
Usage: jsimports <file-or-directory> [options]\n\n\
Given a single file, prints the file with a regenerated define() header.\n\
Given a directory, prints an OK/NO status line per module.\n\n\
Options:\n  \
  -w, --write               Write regenerated output back to disk (only when it differs)\n  \
  -v, --verbose             Show parser diagnostics on stderr\n  \
  -h, --help                Show this message\n  \
  -V, --version             Show version\n\n\
Configuration is read from the nearest jsimports.json above the target.\n"
}

fn main() -> ExitCode {
    let parsed = match parse_args() {
        Ok(parsed) => parsed,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("Try 'jsimports --help'.");
            return ExitCode::from(2);
        }
    };

    if parsed.show_help {
        print!("{}", usage());
        return ExitCode::SUCCESS;
    }
    if parsed.show_version {
        println!("jsimports {VERSION}");
        return ExitCode::SUCCESS;
    }
    if parsed.verbose {
        // Single-threaded and set before any reads.
        unsafe { std::env::set_var("JSIMPORTS_VERBOSE", "1") };
    }

    let Some(target) = parsed.target else {
        return ExitCode::SUCCESS;
    };

    if target.is_dir() {
        run_directory(&target, parsed.write)
    } else {
        run_file(&target, parsed.write)
    }
}

fn run_file(target: &Path, write: bool) -> ExitCode {
    let target = absolutize(target);
    if !target.is_file() {
        println!("File not found");
        return ExitCode::FAILURE;
    }

    let project = match Project::open(&target) {
        Ok(project) => project,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let file = match ModuleFile::read(&target) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    // Distinguish broken JS from valid-but-not-a-module files.
    if let Err(err) = file.analysis() {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }
    if !file.is_module() {
        println!("Not a module");
        return ExitCode::FAILURE;
    }

    let output = match file.regenerated_source(&project) {
        Ok(output) => output,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    if write {
        if output != file.source()
            && let Err(err) = fs::write(&target, &output)
        {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    } else {
        print!("{output}");
    }
    ExitCode::SUCCESS
}

fn run_directory(target: &Path, write: bool) -> ExitCode {
    let project = match Project::open(&absolutize(target)) {
        Ok(project) => project,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    for (_, module_path) in project.modules().clone() {
        let Some(file) = project.get_file(&module_path) else {
            continue;
        };
        if !file.is_module() {
            continue;
        }

        // One bad file must not abort the batch.
        let header = match file.new_define_section(&project) {
            Ok(header) => header,
            Err(err) => {
                eprintln!("[jsimports][warn] {err}");
                continue;
            }
        };

        if write {
            let output = match file.regenerated_source(&project) {
                Ok(output) => output,
                Err(err) => {
                    eprintln!("[jsimports][warn] {err}");
                    continue;
                }
            };
            if output != file.source()
                && let Err(err) = fs::write(file.path(), &output)
            {
                eprintln!("[jsimports][warn] {}: {err}", file.path().display());
            }
        } else if file.current_define_section() == Some(header.as_str()) {
            println!("{} {module_path}", "OK".green());
        } else {
            println!("{} {module_path}", "NO".red());
        }
    }
    ExitCode::SUCCESS
}
