use crate::commands::ResolveCmd;
use std::fmt;
use std::io;
use stroke_widths::parser::Parser;
use stroke_widths::profile::{resolve_widths, ContextError, ResolveContext, ResolveResult};
use stroke_widths::svg::{StyleError, SvgPath, SvgPathError};

#[derive(Debug)]
pub enum ResolveError {
    Io(io::Error),
    Json(serde_json::Error),
    Path(SvgPathError),
    Style(StyleError),
    Context(ContextError),
    InvalidArgument { name: &'static str, value: String },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ResolveError::Io(err) => write!(f, "{}", err),
            ResolveError::Json(err) => write!(f, "{}", err),
            ResolveError::Path(err) => write!(f, "Invalid path data: {}", err),
            ResolveError::Style(err) => write!(f, "Invalid style: {}", err),
            ResolveError::Context(err) => write!(f, "{}", err),
            ResolveError::InvalidArgument { name, value } => {
                write!(f, "Invalid value {:?} for --{}", value, name)
            }
        }
    }
}

impl From<io::Error> for ResolveError {
    fn from(err: io::Error) -> Self {
        ResolveError::Io(err)
    }
}

impl From<serde_json::Error> for ResolveError {
    fn from(err: serde_json::Error) -> Self {
        ResolveError::Json(err)
    }
}

impl From<SvgPathError> for ResolveError {
    fn from(err: SvgPathError) -> Self {
        ResolveError::Path(err)
    }
}

impl From<StyleError> for ResolveError {
    fn from(err: StyleError) -> Self {
        ResolveError::Style(err)
    }
}

impl From<ContextError> for ResolveError {
    fn from(err: ContextError) -> Self {
        ResolveError::Context(err)
    }
}

pub fn resolve(mut cmd: ResolveCmd) -> Result<(), ResolveError> {
    let path = match cmd.path {
        Some(ref d) => Some(SvgPath::parse(d, &cmd.path_options)?),
        None => None,
    };

    let mut ctx = ResolveContext::new(&cmd.style);
    if let Some(ref path) = path {
        ctx = ctx.with_path(path);
    }

    let result = resolve_widths(&cmd.attributes, &Parser::new(), &ctx, &cmd.options)?;

    for name in &result.parse_errors {
        log::warn!("Error parsing {}", name);
    }

    if cmd.json {
        serde_json::to_writer_pretty(&mut *cmd.output, &result)?;
        writeln!(&mut *cmd.output)?;
    } else {
        write_text(&mut *cmd.output, &result)?;
    }

    Ok(())
}

fn write_text(output: &mut dyn io::Write, result: &ResolveResult) -> io::Result<()> {
    for point in &result.widths {
        writeln!(output, "{} {} {}", point.offset, point.left, point.right)?;
    }

    if !result.parse_errors.is_empty() {
        writeln!(output, "parse errors: {}", result.parse_errors.join(", "))?;
    }

    Ok(())
}
