/// One choice of a radio group: what is shown and what is stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct RadioOption {
    pub(crate) label: String,
    pub(crate) value: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum FieldKind {
    Input,
    TextArea,
    InputNumber,
    RadioGroup { options: Vec<RadioOption> },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Rule {
    Required { message: String },
    Min { value: i64, message: String },
    Max { value: i64, message: String },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct FieldAttrs {
    pub(crate) min: Option<i64>,
    pub(crate) max: Option<i64>,
    pub(crate) disabled: bool,
    pub(crate) placeholder: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FieldSpec {
    pub(crate) key: String,
    pub(crate) label: String,
    pub(crate) kind: FieldKind,
    pub(crate) rules: Vec<Rule>,
    pub(crate) default: Option<String>,
    pub(crate) attrs: FieldAttrs,
}

impl FieldSpec {
    pub(crate) fn new(key: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            kind,
            rules: Vec::new(),
            default: None,
            attrs: FieldAttrs::default(),
        }
    }

    pub(crate) fn input(key: &str, label: &str) -> Self {
        Self::new(key, label, FieldKind::Input)
    }

    pub(crate) fn text_area(key: &str, label: &str) -> Self {
        Self::new(key, label, FieldKind::TextArea)
    }

    pub(crate) fn number(key: &str, label: &str) -> Self {
        Self::new(key, label, FieldKind::InputNumber)
    }

    pub(crate) fn radio(key: &str, label: &str, options: &[(&str, &str)]) -> Self {
        let options = options
            .iter()
            .map(|(label, value)| RadioOption {
                label: label.to_string(),
                value: value.to_string(),
            })
            .collect();
        Self::new(key, label, FieldKind::RadioGroup { options })
    }

    pub(crate) fn required(self, message: &str) -> Self {
        self.rule(Rule::Required {
            message: message.to_string(),
        })
    }

    pub(crate) fn range(mut self, min: i64, max: i64) -> Self {
        self.attrs.min = Some(min);
        self.attrs.max = Some(max);
        self
    }

    pub(crate) fn at_least(self, value: i64, message: &str) -> Self {
        self.rule(Rule::Min {
            value,
            message: message.to_string(),
        })
    }

    pub(crate) fn at_most(self, value: i64, message: &str) -> Self {
        self.rule(Rule::Max {
            value,
            message: message.to_string(),
        })
    }

    pub(crate) fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub(crate) fn default_value(mut self, value: &str) -> Self {
        self.default = Some(value.to_string());
        self
    }

    pub(crate) fn disabled(mut self) -> Self {
        self.attrs.disabled = true;
        self
    }

    pub(crate) fn placeholder(mut self, text: &str) -> Self {
        self.attrs.placeholder = Some(text.to_string());
        self
    }

    pub(crate) fn is_required(&self) -> bool {
        self.rules
            .iter()
            .any(|rule| matches!(rule, Rule::Required { .. }))
    }

    pub(crate) fn required_message(&self) -> String {
        self.rules
            .iter()
            .find_map(|rule| match rule {
                Rule::Required { message } => Some(message.clone()),
                _ => None,
            })
            .unwrap_or_else(|| format!("{} is required", self.label))
    }
}

/// Ordered field list; order is display order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct FormSchema {
    pub(crate) fields: Vec<FieldSpec>,
}

impl FormSchema {
    pub(crate) fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }
}
