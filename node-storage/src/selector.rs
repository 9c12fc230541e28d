use super::*;

/// Field selector limited to equality terms, e.g. `metadata.name=minikube`.
///
/// An empty selector matches every node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldSelector {
    terms: Vec<(String, String)>,
}

impl FieldSelector {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn node_name(name: impl ToString) -> Self {
        Self {
            terms: vec![(NODE_NAME_FIELD.to_string(), name.to_string())],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> impl Iterator<Item = (&str, &str)> {
        self.terms
            .iter()
            .map(|(field, value)| (field.as_str(), value.as_str()))
    }

    /// Evaluates the selector locally. Only `metadata.name` is known here,
    /// any other field never matches.
    pub fn matches(&self, node: &NodeSnapshot) -> bool {
        self.terms().all(|(field, value)| match field {
            NODE_NAME_FIELD => node.name == value,
            _ => false,
        })
    }
}

impl fmt::Display for FieldSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, (field, value)) in self.terms().enumerate() {
            if idx > 0 {
                f.write_str(",")?;
            }
            write!(f, "{field}={value}")?;
        }
        Ok(())
    }
}

impl FromStr for FieldSelector {
    type Err = SelectorError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Self::all());
        }

        let terms = text
            .split(',')
            .map(parse_term)
            .collect::<Result<_, _>>()?;
        Ok(Self { terms })
    }
}

fn parse_term(term: &str) -> Result<(String, String), SelectorError> {
    let term = term.trim();
    let (field, value) = term
        .split_once('=')
        .ok_or_else(|| SelectorError::Malformed(term.to_string()))?;

    if field.ends_with('!') {
        return Err(SelectorError::UnsupportedOperator(term.to_string()));
    }

    // `==` is accepted as a synonym for `=`
    let value = value.strip_prefix('=').unwrap_or(value);
    let field = field.trim();
    if field.is_empty() || value.contains('=') {
        return Err(SelectorError::Malformed(term.to_string()));
    }

    Ok((field.to_string(), value.trim().to_string()))
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("selector term {0:?} is not of the form <field>=<value>")]
    Malformed(String),

    #[error("selector term {0:?} uses an unsupported operator, only equality is allowed")]
    UnsupportedOperator(String),
}
