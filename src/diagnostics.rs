use lolspan::config::CONFIG_FILE;
use lolspan::error::Error;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Render an error as valid markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic.
///
/// Each variant produces a block with what happened and, where there is one, how to fix it.
pub fn render_error(e: &Error) -> String {
    return match e {
        Error::Cancelled => "\
# Error: Cancelled

Classification was cancelled before it finished. No spans were produced.
"
        .to_string(),

        Error::ConfigNotFound { path } => format!("\
# Error: Config Not Found

`{}` does not exist.

## Fix

Check the `--config` path, or drop the flag to use `{CONFIG_FILE}` in the current directory.
", path.display()),

        Error::FileNotFound { path } => format!("\
# Error: File Not Found

`{}` does not exist.
", path.display()),

        Error::UnsupportedFile { ext, path } => render_unsupported_file(ext, &path.display().to_string()),

        Error::TomlDe(e) => format!("\
# Error: Invalid Config

{e}

## Fix

Valid keys in `{CONFIG_FILE}`:

    include = [\"src/\"]
    exclude = [\"src/vendor/\"]
    extensions = [\"lol\", \"lols\"]
    line_offsets = \"exact\"            # or \"legacy\"
    string_exclusion = \"to-line-end\"  # or \"to-closing-quote\"
"),

        Error::WatchFailed { reason } => format!("\
# Error: Watch Failed

{reason}
"),

        Error::Io(e) => format!("\
# Error: I/O

{e}
"),

        Error::Json(e) => format!("\
# Error: JSON Output

{e}
"),
    };
}

fn render_unsupported_file(ext: &str, path: &str) -> String {
    let shown = if ext.is_empty() { "no extension".to_string() } else { format!("`.{ext}`") };
    return format!(
        "\
# Error: Not a LOLCODE File

`{path}` has {shown}.

## Fix

Add the extension to `{CONFIG_FILE}`:

    extensions = [\"lol\", \"lols\", \"{ext}\"]
"
    );
}
