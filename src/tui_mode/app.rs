use crate::input::{History, InputLine};
use crate::program::{Program, Reply, RpnProgram};
use tracing::debug;

pub struct TranscriptEntry {
    pub input: String,
    pub reply: Reply,
}

impl TranscriptEntry {
    pub fn failed(&self) -> bool {
        self.reply.rejection.is_some()
    }
}

pub struct App {
    pub program: RpnProgram,
    pub banner: Vec<String>,
    pub input: InputLine,
    pub input_scroll: usize,
    pub history: History,
    pub transcript: Vec<TranscriptEntry>,
    pub transcript_scroll: usize,
    pub scroll_to_bottom: bool,
    pub should_quit: bool,
    pub show_help: bool,
    pub help_scroll: usize,
    pub list_height: usize,
    pub terminal_too_small: bool,
}

impl App {
    pub fn new(show_banner: bool) -> Self {
        let mut program = RpnProgram::new();
        let banner = program.init();
        App {
            program,
            banner: if show_banner { banner } else { Vec::new() },
            input: InputLine::new(),
            input_scroll: 0,
            history: History::new(),
            transcript: Vec::new(),
            transcript_scroll: 0,
            scroll_to_bottom: false,
            should_quit: false,
            show_help: false,
            help_scroll: 0,
            list_height: 5,
            terminal_too_small: false,
        }
    }

    /// Keeps the cursor inside the visible window of the input box.
    pub fn adjust_input_scroll(&mut self, visible_width: usize) {
        let total = self.input.len();
        let cursor_pos = self.input.cursor();

        if cursor_pos < self.input_scroll {
            self.input_scroll = cursor_pos;
        } else if cursor_pos >= self.input_scroll + visible_width {
            self.input_scroll = cursor_pos + 1 - visible_width.max(1);
        }

        if self.input_scroll > total.saturating_sub(visible_width) {
            self.input_scroll = total.saturating_sub(visible_width);
        }
    }

    pub fn submit(&mut self) {
        let text = self.input.take();
        self.input_scroll = 0;

        if text.trim() == "help" {
            self.show_help = true;
            self.help_scroll = 0;
            return;
        }

        self.history.push(text.trim());
        let reply = self.program.process_input(&text);
        if reply.is_halt() {
            debug!("calculator session halted");
            self.should_quit = true;
        }

        self.transcript.push(TranscriptEntry {
            input: text,
            reply,
        });
        self.scroll_to_bottom = true;
    }

    pub fn recall_previous(&mut self) {
        if let Some(entry) = self.history.previous(self.input.as_str()) {
            let entry = entry.to_string();
            self.input.set(&entry);
        }
    }

    pub fn recall_next(&mut self) {
        if let Some(entry) = self.history.next() {
            let entry = entry.to_string();
            self.input.set(&entry);
        }
    }

    pub fn scroll_transcript(&mut self, direction: i32) {
        let step = self.list_height.saturating_sub(1).max(1);
        if direction < 0 {
            self.transcript_scroll = self.transcript_scroll.saturating_sub(step);
        } else {
            self.transcript_scroll = self.transcript_scroll.saturating_add(step);
        }
    }

    pub fn program_title(&self) -> String {
        format!("RPN Calculator [{}]", self.program.display_name())
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.history.reset_navigation();
        self.input_scroll = 0;
    }
}
