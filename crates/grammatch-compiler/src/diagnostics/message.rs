use rowan::TextRange;

/// Diagnostic kinds ordered by priority (highest priority first).
///
/// When two diagnostics overlap, the higher-priority one suppresses the
/// lower-priority one. This keeps one malformed token from producing a page
/// of follow-up errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Lexical errors swallow the rest of the line or the file
    UnterminatedString,
    UnterminatedComment,
    UnterminatedCharClass,
    UnterminatedRuleName,
    UnrecognizedCharacter,

    // Unclosed delimiters
    UnclosedGroup,
    UnclosedOptional,
    UnclosedRepetition,
    UnclosedBounds,

    // User omitted something required
    ExpectedExpression,
    ExpectedRuleName,
    ExpectedDefinition,
    ExpectedTerminator,
    ExpectedSeparator,

    // User wrote something that doesn't belong
    UnexpectedToken,
    InvalidCharClass,
    InvalidCharCode,
    InvalidEscape,
    InvalidRepetitionBounds,
    NestingTooDeep,

    // Valid syntax, invalid semantics
    DuplicateDefinition,
    UndefinedReference,

    // Whole-grammar observations
    EmptyGrammar,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::EmptyGrammar => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Whether this kind suppresses `other` when spans overlap.
    ///
    /// Lower discriminant means higher priority.
    pub fn suppresses(&self, other: &DiagnosticKind) -> bool {
        self < other
    }

    /// Unclosed delimiters. Suppressed by root-cause errors at the same position.
    pub fn is_structural_error(&self) -> bool {
        matches!(
            self,
            Self::UnclosedGroup
                | Self::UnclosedOptional
                | Self::UnclosedRepetition
                | Self::UnclosedBounds
        )
    }

    /// User omitted something required. Suppresses structural errors at the same position.
    pub fn is_root_cause_error(&self) -> bool {
        matches!(
            self,
            Self::UnterminatedString
                | Self::UnterminatedComment
                | Self::UnterminatedCharClass
                | Self::UnterminatedRuleName
                | Self::ExpectedExpression
                | Self::ExpectedRuleName
                | Self::ExpectedDefinition
                | Self::ExpectedTerminator
        )
    }

    /// Often caused by a syntax error elsewhere (a rule whose head failed to parse
    /// looks undefined). Suppressed when any root-cause or structural error exists.
    pub fn is_consequence_error(&self) -> bool {
        matches!(self, Self::UndefinedReference | Self::EmptyGrammar)
    }

    /// Hint attached to every diagnostic of this kind.
    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::ExpectedTerminator => Some("every rule ends with `;`"),
            Self::ExpectedSeparator => Some("items of a sequence are separated by `,`"),
            Self::InvalidCharCode => Some("e.g., `#x41` for `A`"),
            _ => None,
        }
    }

    /// Base message for this kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnterminatedString => "unterminated string",
            Self::UnterminatedComment => "unterminated comment",
            Self::UnterminatedCharClass => "unterminated character class",
            Self::UnterminatedRuleName => "unterminated rule name",
            Self::UnrecognizedCharacter => "unrecognized character",

            Self::UnclosedGroup => "missing closing `)`",
            Self::UnclosedOptional => "missing closing `]`",
            Self::UnclosedRepetition => "missing closing `}`",
            Self::UnclosedBounds => "missing closing `}` of repetition bounds",

            Self::ExpectedExpression => "expected an expression",
            Self::ExpectedRuleName => "expected a rule name",
            Self::ExpectedDefinition => "expected a rule definition",
            Self::ExpectedTerminator => "expected `;`",
            Self::ExpectedSeparator => "expected `,`",

            Self::UnexpectedToken => "unexpected token",
            Self::InvalidCharClass => "invalid character class",
            Self::InvalidCharCode => "invalid character code",
            Self::InvalidEscape => "invalid escape sequence",
            Self::InvalidRepetitionBounds => "invalid repetition bounds",
            Self::NestingTooDeep => "nesting too deep",

            Self::DuplicateDefinition => "duplicate definition",
            Self::UndefinedReference => "undefined reference",

            Self::EmptyGrammar => "grammar defines no rules",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::DuplicateDefinition => "`{}` is already defined".to_string(),
            Self::UndefinedReference => "`{}` is not defined".to_string(),
            Self::UnrecognizedCharacter => "unrecognized character `{}`".to_string(),

            Self::UnclosedGroup
            | Self::UnclosedOptional
            | Self::UnclosedRepetition
            | Self::UnclosedBounds => format!("{}; {{}}", self.fallback_message()),

            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Text to splice into the grammar source, shown as a suggestion.
///
/// An empty range is an insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fix {
    pub(crate) range: TextRange,
    pub(crate) replacement: String,
    pub(crate) description: String,
}

impl Fix {
    pub fn new(
        range: TextRange,
        replacement: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            range,
            replacement: replacement.into(),
            description: description.into(),
        }
    }

    /// Suggests inserting `text` at `offset`.
    pub fn insert(offset: rowan::TextSize, text: &str) -> Self {
        Self::new(TextRange::empty(offset), text, format!("add `{text}`"))
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) range: TextRange,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(range: TextRange, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    /// The range shown to the user (underlined in output).
    pub(crate) range: TextRange,
    pub(crate) message: String,
    pub(crate) fix: Option<Fix>,
    pub(crate) related: Vec<RelatedInfo>,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, range: TextRange, message: impl Into<String>) -> Self {
        Self {
            kind,
            range,
            message: message.into(),
            fix: None,
            related: Vec::new(),
            hints: kind.default_hint().map(String::from).into_iter().collect(),
        }
    }

    pub(crate) fn with_default_message(kind: DiagnosticKind, range: TextRange) -> Self {
        Self::new(kind, range, kind.fallback_message())
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn fix(&self) -> Option<&Fix> {
        self.fix.as_ref()
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}: {}",
            self.severity(),
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.message
        )?;
        if let Some(fix) = &self.fix {
            write!(
                f,
                " (fix: {} at {})",
                fix.description,
                u32::from(fix.range.start())
            )?;
        }
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message,
                u32::from(related.range.start()),
                u32::from(related.range.end())
            )?;
        }
        for hint in &self.hints {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}
