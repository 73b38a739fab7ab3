use std::path::PathBuf;

#[derive(Debug, Default)]
pub struct ParsedArgs {
    pub target: Option<PathBuf>,
    pub write: bool,
    pub verbose: bool,
    pub show_help: bool,
    pub show_version: bool,
}

pub fn parse_args() -> Result<ParsedArgs, String> {
    let args: Vec<String> = std::env::args_os()
        .skip(1)
        .map(|s| s.to_string_lossy().into_owned())
        .collect();
    let mut parsed = ParsedArgs::default();

    for arg in &args {
        match arg.as_str() {
            "--help" | "-h" => parsed.show_help = true,
            "--version" | "-V" => parsed.show_version = true,
            "--write" | "-w" => parsed.write = true,
            "--verbose" | "-v" => parsed.verbose = true,
            _ if arg.starts_with('-') => {
                return Err(format!("Unknown flag {arg}"));
            }
            _ => {
                let trimmed = arg.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if parsed.target.is_some() {
                    return Err("Expected a single file or directory argument".to_string());
                }
                parsed.target = Some(PathBuf::from(trimmed));
            }
        }
    }

    if parsed.target.is_none() && !parsed.show_help && !parsed.show_version {
        return Err("Expected a file or directory argument".to_string());
    }

    Ok(parsed)
}
