use std::io;
use stroke_widths::profile::{ResolveOptions, StrokeWidthsAttributes};
use stroke_widths::svg::{StyleContext, SvgPathOptions};

pub struct ResolveCmd {
    pub attributes: StrokeWidthsAttributes,
    /// SVG path data, `None` when the element has no `d` attribute.
    pub path: Option<String>,
    pub path_options: SvgPathOptions,
    pub style: StyleContext,
    pub options: ResolveOptions,
    pub json: bool,
    pub output: Box<dyn io::Write>,
}
