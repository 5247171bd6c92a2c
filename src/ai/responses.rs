use std::fmt;

/// Response topics, one per entry of the [`ResponseTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Hello,
    Help,
    Faculty,
    Admission,
    Departments,
    Notifications,
    FacultyLookup,
    Default,
}

impl Topic {
    pub fn key(self) -> &'static str {
        match self {
            Topic::Hello => "hello",
            Topic::Help => "help",
            Topic::Faculty => "faculty",
            Topic::Admission => "admission",
            Topic::Departments => "departments",
            Topic::Notifications => "notifications",
            Topic::FacultyLookup => "faculty_lookup",
            Topic::Default => "default",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

const HELLO: &str = "Hello! 👋 I'm the **University of Malakand AI Assistant**.\n\
Ask me about faculty, departments, admissions or the latest notifications.";

const HELP: &str = "🎓 **University of Malakand AI Assistant**\n\
\n\
I can help you with:\n\
• **Faculty Information** - \"Tell me about faculty\"\n\
• **Departments** - \"Information about Computer Science department\"\n\
• **Admissions** - \"How to apply for admission?\"\n\
• **Notifications** - \"Latest university news\"\n\
\n\
**Example Questions:**\n\
- \"Who teaches in the English department?\"\n\
- \"How to apply for BS Computer Science?\"\n\
- \"What are the recent notifications?\"\n\
\n\
Just ask your question and I'll do my best to point you in the right direction!";

const FACULTY: &str = "Our university has highly qualified faculty members across various departments. \
You can ask about specific professors or departments for more information.";

const ADMISSION: &str = "**Admission Information:**\n\
\n\
The University of Malakand offers various undergraduate and graduate programs.\n\
\n\
**Undergraduate Programs:**\n\
- Intermediate (12 years) with relevant subjects\n\
- Entry test (if required)\n\
- Merit-based selection\n\
\n\
**Graduate Programs:**\n\
- Bachelor's degree from recognized institution\n\
- Relevant academic background\n\
\n\
For specific requirements, visit www.uom.edu.pk";

const DEPARTMENTS: &str = "**Departments:**\n\
\n\
The university hosts departments across the sciences, social sciences, languages and management.\n\
Tell me which department you are interested in, or visit www.uom.edu.pk for the full list.";

const NOTIFICATIONS: &str = "**Notifications:**\n\
\n\
Live university announcements are not connected yet.\n\
Please check the news section on www.uom.edu.pk for the latest notices.";

const FACULTY_LOOKUP: &str = "Looking up individual faculty members is not available yet. \
Please check the faculty directory on the university website in the meantime.";

const DEFAULT: &str = "I'm here to help with University of Malakand information. \
You can ask about faculty, departments, admissions, or general university queries.";

/// Ordered topic → response mapping. Always holds a `default` entry.
#[derive(Debug, Clone)]
pub struct ResponseTable {
    entries: Vec<(Topic, String)>,
    default: String,
}

impl ResponseTable {
    pub fn new(default: impl Into<String>) -> Self {
        Self {
            entries: Vec::new(),
            default: default.into(),
        }
    }

    /// Adds (or replaces) the response for `topic`.
    pub fn with(mut self, topic: Topic, text: impl Into<String>) -> Self {
        let text = text.into();
        if topic == Topic::Default {
            self.default = text;
            return self;
        }
        match self.entries.iter_mut().find(|(t, _)| *t == topic) {
            Some(entry) => entry.1 = text,
            None => self.entries.push((topic, text)),
        }
        self
    }

    /// The canned responses shipped with the assistant.
    pub fn builtin() -> Self {
        ResponseTable::new(DEFAULT)
            .with(Topic::Hello, HELLO)
            .with(Topic::Help, HELP)
            .with(Topic::Faculty, FACULTY)
            .with(Topic::Admission, ADMISSION)
            .with(Topic::Departments, DEPARTMENTS)
            .with(Topic::Notifications, NOTIFICATIONS)
            .with(Topic::FacultyLookup, FACULTY_LOOKUP)
    }

    /// Response for `topic`, or the default text when the table has none.
    pub fn get(&self, topic: Topic) -> &str {
        self.entries
            .iter()
            .find(|(t, _)| *t == topic)
            .map(|(_, text)| text.as_str())
            .unwrap_or_else(|| self.default_response())
    }

    pub fn default_response(&self) -> &str {
        &self.default
    }

    /// Entries in insertion order, `default` last.
    pub fn iter(&self) -> impl Iterator<Item = (Topic, &str)> {
        self.entries
            .iter()
            .map(|(t, text)| (*t, text.as_str()))
            .chain(std::iter::once((Topic::Default, self.default.as_str())))
    }
}

impl Default for ResponseTable {
    fn default() -> Self {
        Self::builtin()
    }
}
