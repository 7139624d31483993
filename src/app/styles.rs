use owo_colors::Style;

// Stylesheet used to colorize prints.
#[derive(Debug, Default)]
pub(crate) struct Styles {
    pub header_style: Style,
    pub block_style: Style,
    pub value_style: Style,
}

impl Styles {
    pub(crate) fn colorize(&mut self) {
        self.header_style = Style::new().bold().bright_blue();
        self.block_style = Style::new().bright_green();
        self.value_style = Style::new().bright_yellow();
    }

    /// A stylesheet which is only colorized when stdout supports it
    pub(crate) fn for_stdout() -> Self {
        let mut styles = Self::default();
        if supports_color::on(supports_color::Stream::Stdout).is_some() {
            styles.colorize();
        }
        styles
    }
}
