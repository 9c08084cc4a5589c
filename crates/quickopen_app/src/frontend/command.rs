/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command<'a> {
    /// New content of the search box, kept verbatim.
    Input(&'a str),
    Open(&'a str),
    ChangeDir(&'a str),
    Activate,
    Reload,
    Help,
    Quit,
}

impl<'a> Command<'a> {
    /// Lines starting with `:` are commands; everything else is search input.
    /// Use `::` to search for text that itself starts with a colon.
    pub(crate) fn parse(line: &'a str) -> Self {
        let Some(rest) = line.strip_prefix(':') else {
            return Command::Input(line);
        };
        if rest.starts_with(':') {
            return Command::Input(rest);
        }
        let (name, arg) = match rest.split_once(' ') {
            Some((name, arg)) => (name, arg),
            None => (rest, ""),
        };
        match name {
            "open" | "o" if !arg.is_empty() => Command::Open(arg),
            "cd" => Command::ChangeDir(arg),
            "activate" | "a" => Command::Activate,
            "reload" => Command::Reload,
            "quit" | "q" => Command::Quit,
            _ => Command::Help,
        }
    }
}
