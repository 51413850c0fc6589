use indexmap::{IndexMap, IndexSet};

/// The operation an [`Action`] compiles to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Retrieve,
    Update,
    Delete,
    Search,
}

impl Operation {
    pub const fn is_query(self) -> bool {
        matches!(self, Self::Retrieve | Self::Search)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Retrieve => "RETRIEVE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Search => "SEARCH",
        }
    }
}

impl core::fmt::Display for Operation {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Comparison operator of a SEARCH predicate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Comparator {
    #[default]
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Comparator {
    /// Suffixes in match order: two-character operators first.
    const SUFFIXES: &'static [(&'static str, Comparator)] = &[
        ("<=", Comparator::Le),
        (">=", Comparator::Ge),
        ("<>", Comparator::Ne),
        ("<", Comparator::Lt),
        (">", Comparator::Gt),
    ];

    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }
}

/// A column token of an action's argument list.
///
/// The token grammar is `[*]column[cmp]`: a leading `*` marks the column
/// required and an optional comparator suffix (`<`, `>`, `<=`, `>=`, `<>`)
/// selects the SEARCH operator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Arg {
    pub column: String,
    pub required: bool,
    pub cmp: Comparator,
}

impl Arg {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            required: false,
            cmp: Comparator::Eq,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn cmp(mut self, cmp: Comparator) -> Self {
        self.cmp = cmp;
        self
    }

    pub fn parse(token: &str) -> Self {
        let mut token = token.trim();
        let mut cmp = Comparator::Eq;

        if let Some((suffix, found)) = Comparator::SUFFIXES
            .iter()
            .find(|(suffix, _)| token.ends_with(suffix))
        {
            token = token[..token.len() - suffix.len()].trim_end();
            cmp = *found;
        }

        let (required, column) = match token.strip_prefix('*') {
            Some(column) => (true, column.trim_start()),
            None => (false, token),
        };

        Self {
            column: column.to_string(),
            required,
            cmp,
        }
    }
}

impl core::fmt::Display for Arg {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if self.required {
            f.write_str("*")?;
        }
        f.write_str(&self.column)?;
        if self.cmp != Comparator::Eq {
            f.write_str(self.cmp.as_sql())?;
        }
        Ok(())
    }
}

/// A value restriction on a column.
///
/// Restriction text is inlined into the generated SQL as is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Restriction {
    /// The column equals the literal; no parameter is bound.
    Literal(String),

    /// The column differs from the literal. A leading `!` in the source
    /// text selects this form.
    Not(String),
}

impl Restriction {
    pub fn parse(src: &str) -> Self {
        match src.strip_prefix('!') {
            Some(literal) => Self::Not(literal.to_string()),
            None => Self::Literal(src.to_string()),
        }
    }

    pub const fn is_negative(&self) -> bool {
        matches!(self, Self::Not(_))
    }

    /// The positive literal, if any.
    pub fn literal(&self) -> Option<&str> {
        match self {
            Self::Literal(literal) => Some(literal),
            Self::Not(_) => None,
        }
    }
}

impl core::fmt::Display for Restriction {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Self::Literal(literal) => f.write_str(literal),
            Self::Not(literal) => write!(f, "!{literal}"),
        }
    }
}

/// A declarative CRUD or SEARCH request: an operation, a column list and
/// value restrictions.
///
/// For CREATE the column list names columns to leave out of the INSERT. For
/// the other operations it names the columns to act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    op: Operation,
    args: Vec<Arg>,
    restriction: IndexMap<String, Restriction>,

    /// Columns that become optional SEARCH filters, in argument order
    optionals: Vec<String>,
}

impl Action {
    pub fn new(op: Operation) -> Self {
        Self::build(op, vec![], IndexMap::new())
    }

    pub fn with_args<I, S>(op: Operation, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::build(op, parse_args(args), IndexMap::new())
    }

    /// An action driven by restrictions alone. SEARCH filters on every
    /// restricted column.
    pub fn with_restriction<I, K, V>(op: Operation, restriction: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let restriction = parse_restriction(restriction);
        let args = match op {
            Operation::Search => restriction.keys().map(|key| Arg::parse(key)).collect(),
            _ => vec![],
        };
        Self::build(op, args, restriction)
    }

    /// An action with both a column list and restrictions. UPDATE and SEARCH
    /// act on the union of both, the column list first.
    pub fn with_args_and_restriction<A, S, I, K, V>(op: Operation, args: A, restriction: I) -> Self
    where
        A: IntoIterator<Item = S>,
        S: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut args = parse_args(args);
        let restriction = parse_restriction(restriction);

        if matches!(op, Operation::Update | Operation::Search) {
            for key in restriction.keys() {
                if !args.iter().any(|arg| &arg.column == key) {
                    args.push(Arg::parse(key));
                }
            }
        }

        Self::build(op, args, restriction)
    }

    fn build(op: Operation, args: Vec<Arg>, restriction: IndexMap<String, Restriction>) -> Self {
        let optionals = args
            .iter()
            .filter(|arg| {
                !arg.required
                    && restriction
                        .get(&arg.column)
                        .map_or(true, Restriction::is_negative)
            })
            .map(|arg| arg.column.clone())
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect();

        Self {
            op,
            args,
            restriction,
            optionals,
        }
    }

    pub fn op(&self) -> Operation {
        self.op
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    pub fn arg(&self, column: &str) -> Option<&Arg> {
        self.args.iter().find(|arg| arg.column == column)
    }

    pub fn has_arg(&self, column: &str) -> bool {
        self.arg(column).is_some()
    }

    pub fn restriction(&self) -> &IndexMap<String, Restriction> {
        &self.restriction
    }

    pub fn restriction_of(&self, column: &str) -> Option<&Restriction> {
        self.restriction.get(column)
    }

    /// Columns that are neither required nor pinned to a literal, each
    /// listed once. Every predicate on an optional column binds the same
    /// field, so they are kept or dropped together.
    pub fn optionals(&self) -> &[String] {
        &self.optionals
    }

    pub fn is_required(&self, column: &str) -> bool {
        self.arg(column).is_some_and(|arg| arg.required)
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{} args=[", self.op)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str("] restriction={")?;
        for (i, (column, restriction)) in self.restriction.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{column}={restriction}")?;
        }
        f.write_str("}")
    }
}

fn parse_args<I, S>(args: I) -> Vec<Arg>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    args.into_iter()
        .map(|token| Arg::parse(token.as_ref()))
        .filter(|arg| !arg.column.is_empty())
        .collect()
}

fn parse_restriction<I, K, V>(restriction: I) -> IndexMap<String, Restriction>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: AsRef<str>,
{
    restriction
        .into_iter()
        .map(|(column, value)| (column.into(), Restriction::parse(value.as_ref())))
        .collect()
}
