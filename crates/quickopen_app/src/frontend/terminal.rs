use quickopen_core::activation_id;
use quickopen_engine::{DocumentOpener, SidebarControl, ViewSink};
use quickopen_logging::qo_debug;

/// Prints the categorized listing, one heading per category.
#[derive(Default)]
pub(crate) struct TerminalView {
    current_category: Option<String>,
}

impl ViewSink for TerminalView {
    fn clear(&mut self) {
        self.current_category = None;
        println!("----");
    }

    fn add_entry(&mut self, category: &str, filename: &str) -> String {
        if self.current_category.as_deref() != Some(category) {
            println!("{category}/");
            self.current_category = Some(category.to_string());
        }
        println!("    {filename}");
        activation_id(category, filename)
    }
}

pub(crate) struct TerminalOpener;

impl DocumentOpener for TerminalOpener {
    fn open_or_reveal(&mut self, path: &str) {
        println!("open: {path}");
    }
}

pub(crate) struct TerminalSidebar;

impl SidebarControl for TerminalSidebar {
    fn collapse(&mut self) {
        // Nothing to collapse in a terminal.
        qo_debug!("Sidebar collapse requested");
    }
}
