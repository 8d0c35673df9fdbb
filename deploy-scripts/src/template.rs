//! The dispute template rendered to arbitrators when a reality.eth question
//! is escalated to Kleros.
//!
//! The template is a JSON document with mustache-style placeholders. Most of
//! it is fixed; only the arbitrator chain id and address are filled in at
//! deployment time. The question, its type and answers, and the frontend URL
//! parameters stay as placeholders and are substituted by the dispute
//! renderer once a dispute is raised:
//! - `{{ name }}` interpolates the value under `name`
//! - `{{# name }} ... {{/ name }}` renders its body once per element of the
//!   list under `name`
//! - `{{^ name }} ... {{/ name }}` renders its body only if `name` is falsy
//!
//! The template is held as a [`TemplateDocument`], a token list that can be
//! inspected directly or serialized back into placeholder syntax.

use std::fmt::{self, Display};

use serde_json::Value;

use crate::{
    constants::{
        ANSWERED_TOO_SOON_DESCRIPTION, ANSWERED_TOO_SOON_TITLE, ANSWERS_KEY,
        ANSWER_DESCRIPTION_KEY, ANSWER_TITLE_KEY, DISPUTE_TEMPLATE_MAPPINGS, LAST_KEY,
        QUESTION_ID_KEY, QUESTION_KEY, REALITY_ADDRESS_KEY, TEMPLATE_CATEGORY,
        TEMPLATE_DESCRIPTION, TEMPLATE_FRONTEND_URL_PREFIX, TEMPLATE_LANG,
        TEMPLATE_POLICY_URI, TEMPLATE_SPECIFICATION, TEMPLATE_TITLE, TEMPLATE_VERSION, TYPE_KEY,
    },
    errors::DeployError,
};

/// The indentation of top level fields
const FIELD_INDENT: &str = "    ";
/// The indentation of answer entries
const ANSWER_INDENT: &str = "      ";
/// The indentation of fields within an answer entry
const ANSWER_FIELD_INDENT: &str = "          ";

// ------------
// | Document |
// ------------

/// A single token of a template document
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TemplateToken {
    /// Literal text
    Text(String),
    /// An interpolated value, `{{ name }}`
    Variable(String),
    /// A section rendered once per element of a list, `{{# name }}`
    Section {
        /// The key of the list
        name: String,
        /// The tokens rendered for each element
        body: Vec<TemplateToken>,
    },
    /// A section rendered only when its key is falsy, `{{^ name }}`
    Inverted {
        /// The key that suppresses the section
        name: String,
        /// The tokens rendered when the key is falsy
        body: Vec<TemplateToken>,
    },
}

/// A document of literal text interleaved with placeholders
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TemplateDocument {
    tokens: Vec<TemplateToken>,
}

impl TemplateDocument {
    /// The tokens of the document
    pub fn tokens(&self) -> &[TemplateToken] {
        &self.tokens
    }

    /// Serialize the document into placeholder syntax
    pub fn to_source(&self) -> String {
        let mut out = String::new();
        write_source(&self.tokens, &mut out);
        out
    }

    /// The names of all interpolated values, in document order,
    /// including those nested in sections
    pub fn variables(&self) -> Vec<&str> {
        let mut names = Vec::new();
        collect_variables(&self.tokens, &mut names);
        names
    }

    /// The top level sections of the document
    pub fn sections(&self) -> Vec<(&str, &[TemplateToken])> {
        self.tokens
            .iter()
            .filter_map(|token| match token {
                TemplateToken::Section { name, body } => {
                    Some((name.as_str(), body.as_slice()))
                }
                _ => None,
            })
            .collect()
    }

    /// Render the document against a context, the way the dispute renderer
    /// fills in a raised dispute.
    ///
    /// Every placeholder sits inside a JSON string literal, so string values
    /// are JSON-escaped as they are interpolated.
    pub fn render(&self, context: &Value) -> String {
        let mut out = String::new();
        render_tokens(&self.tokens, &mut vec![context], &mut out);
        out
    }
}

impl Display for TemplateDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_source())
    }
}

/// Builds a template document, merging adjacent text
#[derive(Default)]
struct DocumentBuilder {
    tokens: Vec<TemplateToken>,
}

impl DocumentBuilder {
    /// Append literal text
    fn text(mut self, text: &str) -> Self {
        match self.tokens.last_mut() {
            Some(TemplateToken::Text(existing)) => existing.push_str(text),
            _ => self.tokens.push(TemplateToken::Text(text.to_string())),
        }
        self
    }

    /// Append an interpolated value
    fn variable(mut self, name: &str) -> Self {
        self.tokens.push(TemplateToken::Variable(name.to_string()));
        self
    }

    /// Append a section iterating over `name`
    fn section(mut self, name: &str, body: DocumentBuilder) -> Self {
        self.tokens.push(TemplateToken::Section {
            name: name.to_string(),
            body: body.tokens,
        });
        self
    }

    /// Append a section suppressed by `name`
    fn inverted(mut self, name: &str, body: DocumentBuilder) -> Self {
        self.tokens.push(TemplateToken::Inverted {
            name: name.to_string(),
            body: body.tokens,
        });
        self
    }

    /// Append a top level field holding a fixed string
    fn field(self, key: &str, value: &str) -> Self {
        self.text(&format!(
            "{FIELD_INDENT}{}: {},\n",
            json_string(key),
            json_string(value)
        ))
    }

    /// Append a top level field whose value is a single placeholder
    fn placeholder_field(self, key: &str, placeholder: &str) -> Self {
        self.text(&format!("{FIELD_INDENT}{}: \"", json_string(key)))
            .variable(placeholder)
            .text("\",\n")
    }

    fn build(self) -> TemplateDocument {
        TemplateDocument { tokens: self.tokens }
    }
}

/// Quote a string as a JSON string literal
fn json_string(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

/// Escape a string for use inside a JSON string literal
fn escape_json(s: &str) -> String {
    let quoted = json_string(s);
    quoted[1..quoted.len() - 1].to_string()
}

fn write_source(tokens: &[TemplateToken], out: &mut String) {
    for token in tokens {
        match token {
            TemplateToken::Text(text) => out.push_str(text),
            TemplateToken::Variable(name) => out.push_str(&format!("{{{{ {name} }}}}")),
            TemplateToken::Section { name, body } => {
                out.push_str(&format!("{{{{# {name} }}}}"));
                write_source(body, out);
                out.push_str(&format!("{{{{/ {name} }}}}"));
            }
            TemplateToken::Inverted { name, body } => {
                out.push_str(&format!("{{{{^ {name} }}}}"));
                write_source(body, out);
                out.push_str(&format!("{{{{/ {name} }}}}"));
            }
        }
    }
}

fn collect_variables<'a>(tokens: &'a [TemplateToken], names: &mut Vec<&'a str>) {
    for token in tokens {
        match token {
            TemplateToken::Text(_) => {}
            TemplateToken::Variable(name) => names.push(name),
            TemplateToken::Section { body, .. } | TemplateToken::Inverted { body, .. } => {
                collect_variables(body, names)
            }
        }
    }
}

// -------------
// | Rendering |
// -------------

/// Look a key up in the context stack, innermost context first
fn lookup<'a>(stack: &[&'a Value], name: &str) -> Option<&'a Value> {
    stack.iter().rev().find_map(|ctx| ctx.get(name))
}

/// Mustache truthiness
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(_) => true,
    }
}

fn render_tokens<'a>(tokens: &[TemplateToken], stack: &mut Vec<&'a Value>, out: &mut String) {
    for token in tokens {
        match token {
            TemplateToken::Text(text) => out.push_str(text),
            TemplateToken::Variable(name) => match lookup(stack, name) {
                Some(Value::String(s)) => out.push_str(&escape_json(s)),
                Some(Value::Null) | None => {}
                Some(other) => out.push_str(&other.to_string()),
            },
            TemplateToken::Section { name, body } => {
                match lookup(stack, name) {
                    Some(Value::Array(items)) => {
                        for item in items {
                            stack.push(item);
                            render_tokens(body, stack, out);
                            stack.pop();
                        }
                    }
                    Some(v) if v.is_object() => {
                        stack.push(v);
                        render_tokens(body, stack, out);
                        stack.pop();
                    }
                    v if is_truthy(v) => render_tokens(body, stack, out),
                    _ => {}
                }
            }
            TemplateToken::Inverted { name, body } => {
                if !is_truthy(lookup(stack, name)) {
                    render_tokens(body, stack, out);
                }
            }
        }
    }
}

// --------------------
// | Dispute template |
// --------------------

/// An answer option offered to arbitrators
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Answer {
    /// The answer's title
    pub title: &'static str,
    /// The answer's description
    pub description: &'static str,
}

/// The answer arbitrators give when the question was answered before it
/// could be; always the first answer option
pub const ANSWERED_TOO_SOON: Answer = Answer {
    title: ANSWERED_TOO_SOON_TITLE,
    description: ANSWERED_TOO_SOON_DESCRIPTION,
};

/// The dispute template of RealityV2 disputes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisputeTemplate {
    /// The dispute title
    pub title: &'static str,
    /// The dispute description
    pub description: &'static str,
    /// The answers prepended to the question's own answers
    pub fixed_answers: Vec<Answer>,
    /// The policy document
    pub policy_uri: &'static str,
    /// The chain the arbitrator lives on
    pub arbitrator_chain_id: u64,
    /// The arbitrator address
    pub arbitrator_address: String,
    /// The court category
    pub category: &'static str,
    /// The template language
    pub lang: &'static str,
    /// The specification the template conforms to
    pub specification: &'static str,
    /// The template version
    pub version: &'static str,
}

impl DisputeTemplate {
    /// Create the dispute template for the given arbitrator
    pub fn new(chain_id: u64, arbitrator_address: &str) -> Result<Self, DeployError> {
        if arbitrator_address.trim().is_empty() {
            return Err(DeployError::InvalidTemplateInput(
                "arbitrator address is empty".to_string(),
            ));
        }

        Ok(Self {
            title: TEMPLATE_TITLE,
            description: TEMPLATE_DESCRIPTION,
            fixed_answers: vec![ANSWERED_TOO_SOON],
            policy_uri: TEMPLATE_POLICY_URI,
            arbitrator_chain_id: chain_id,
            arbitrator_address: arbitrator_address.to_string(),
            category: TEMPLATE_CATEGORY,
            lang: TEMPLATE_LANG,
            specification: TEMPLATE_SPECIFICATION,
            version: TEMPLATE_VERSION,
        })
    }

    /// Build the template document
    pub fn to_document(&self) -> TemplateDocument {
        let mut doc = DocumentBuilder::default()
            .text("{\n")
            .field("title", self.title)
            .field("description", self.description)
            .placeholder_field("question", QUESTION_KEY)
            .placeholder_field("type", TYPE_KEY)
            .text(&format!("{FIELD_INDENT}\"answers\": [\n"));

        for answer in &self.fixed_answers {
            doc = doc.text(&format!(
                "{ANSWER_INDENT}{{\n\
                 {ANSWER_FIELD_INDENT}\"title\": {},\n\
                 {ANSWER_FIELD_INDENT}\"description\": {}\n\
                 {ANSWER_INDENT}}},\n",
                json_string(answer.title),
                json_string(answer.description),
            ));
        }

        let answer_entry = DocumentBuilder::default()
            .text(&format!("\n{ANSWER_INDENT}{{\n{ANSWER_FIELD_INDENT}\"title\": \""))
            .variable(ANSWER_TITLE_KEY)
            .text(&format!("\",\n{ANSWER_FIELD_INDENT}\"description\": \""))
            .variable(ANSWER_DESCRIPTION_KEY)
            .text(&format!("\"\n{ANSWER_INDENT}}}"))
            .inverted(LAST_KEY, DocumentBuilder::default().text(","))
            .text(&format!("\n{ANSWER_INDENT}"));

        doc.text(ANSWER_INDENT)
            .section(ANSWERS_KEY, answer_entry)
            .text(&format!("\n{FIELD_INDENT}],\n"))
            .field("policyURI", self.policy_uri)
            .text(&format!("{FIELD_INDENT}\"frontendUrl\": \"{TEMPLATE_FRONTEND_URL_PREFIX}"))
            .variable(REALITY_ADDRESS_KEY)
            .text("-")
            .variable(QUESTION_ID_KEY)
            .text("\",\n")
            .field("arbitratorChainID", &self.arbitrator_chain_id.to_string())
            .field("arbitratorAddress", &self.arbitrator_address)
            .field("category", self.category)
            .field("lang", self.lang)
            .field("specification", self.specification)
            .text(&format!(
                "{FIELD_INDENT}{}: {}\n}}",
                json_string("version"),
                json_string(self.version)
            ))
            .build()
    }
}

/// Build the dispute template for the given arbitrator, returning the
/// serialized template and its mappings
pub fn build_dispute_template(
    chain_id: u64,
    arbitrator_address: &str,
) -> Result<(String, &'static str), DeployError> {
    let template = DisputeTemplate::new(chain_id, arbitrator_address)?;
    Ok((template.to_document().to_source(), DISPUTE_TEMPLATE_MAPPINGS))
}
