//! Help output.
//!
//! [`HelpFormatter`] renders paginated command listings, search results and
//! detailed help for one command. Only commands the issuer may run are
//! shown. [`HelpFormatter::declaration`] builds the `help` command itself.

use regex::Regex;
use std::sync::{Arc, LazyLock};

use crate::command::{CommandDefinition, CommandRegistry, ParameterSpec};
use crate::declare::CommandDeclaration;
use crate::issuer::{permits, CommandIssuer};
use crate::message::{render, Message, Messages};

/// Default number of entries per page.
pub const DEFAULT_PER_PAGE: usize = 10;

static EMPTY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<c[1-3]>\s*</c[1-3]>").expect("valid empty tag pattern"));

/// Renders help for the commands in a registry.
#[derive(Debug, Clone)]
pub struct HelpFormatter {
    per_page: usize,
    prefix: String,
    messages: Messages,
}

impl Default for HelpFormatter {
    fn default() -> Self {
        Self::new("/", Messages::default())
    }
}

impl HelpFormatter {
    /// Create a formatter for the given command prefix and templates.
    pub fn new(prefix: impl Into<String>, messages: Messages) -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            prefix: prefix.into(),
            messages,
        }
    }

    /// Set the number of entries per page (at least one).
    pub fn with_per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    /// Entries per page.
    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Commands the issuer may run, sorted by name.
    pub fn visible(
        &self,
        registry: &CommandRegistry,
        issuer: &dyn CommandIssuer,
    ) -> Vec<Arc<CommandDefinition>> {
        registry
            .commands()
            .into_iter()
            .filter(|command| permits(issuer, command.permission()).is_ok())
            .collect()
    }

    /// One page of the full listing.
    pub fn page(
        &self,
        registry: &CommandRegistry,
        issuer: &dyn CommandIssuer,
        page: usize,
    ) -> Vec<Message> {
        let commands = self.visible(registry, issuer);
        self.listing(&commands, None, page)
    }

    /// One page of commands matching every search term.
    ///
    /// A term matches a command when its name, an alias or its description
    /// contains it, ignoring case.
    pub fn search(
        &self,
        registry: &CommandRegistry,
        issuer: &dyn CommandIssuer,
        terms: &[&str],
        page: usize,
    ) -> Vec<Message> {
        let terms: Vec<String> = terms.iter().map(|t| t.to_lowercase()).collect();
        let commands: Vec<_> = self
            .visible(registry, issuer)
            .into_iter()
            .filter(|command| terms.iter().all(|term| matches_term(command, term)))
            .collect();
        let search = terms.join(" ");
        if commands.is_empty() {
            return vec![Message::error(render(
                &self.messages.help_no_results,
                &[("search", &search)],
            ))];
        }
        self.listing(&commands, Some(&search), page)
    }

    /// Detailed help for one command: its entry and a line per parameter.
    pub fn detailed(&self, command: &CommandDefinition) -> Vec<Message> {
        let mut lines = vec![Message::help(self.entry(command))];
        lines.extend(command.params().iter().map(|param| {
            Message::help(tidy(&render(
                &self.messages.help_parameter,
                &[
                    ("name", &param.name),
                    ("syntax", &param.syntax()),
                    ("description", &parameter_description(param)),
                ],
            )))
        }));
        lines
    }

    /// Answer a `help` query and send the result to the issuer.
    ///
    /// A trailing number selects a page. A single word naming a visible
    /// command shows its detailed help; anything else is a search.
    pub fn show(&self, registry: &CommandRegistry, issuer: &mut dyn CommandIssuer, query: &str) {
        let mut terms: Vec<&str> = query.split_whitespace().collect();
        let page = match terms.last().and_then(|t| t.parse::<usize>().ok()) {
            Some(page) => {
                terms.pop();
                page
            }
            None => 1,
        };

        let messages = match terms.as_slice() {
            [] => self.page(registry, &*issuer, page),
            [single] => match registry.lookup(single) {
                Some(command) if permits(&*issuer, command.permission()).is_ok() => {
                    self.detailed(&command)
                }
                _ => self.search(registry, &*issuer, &terms, page),
            },
            _ => self.search(registry, &*issuer, &terms, page),
        };
        for message in messages {
            issuer.send_message(message);
        }
    }

    /// Declaration of the `help` command backed by this formatter.
    pub fn declaration(self) -> CommandDeclaration {
        let formatter = Arc::new(self);
        CommandDeclaration::new("help|?")
            .description("Show help for commands")
            .param(
                ParameterSpec::optional("query", "string")
                    .greedy()
                    .with_syntax("[search] [page]")
                    .with_description("Command name, search terms or page number"),
            )
            .handler(move |ctx| {
                let query = ctx.args.get_str("query").unwrap_or_default().to_string();
                formatter.show(ctx.registry, ctx.issuer, &query);
                Ok(())
            })
    }

    fn listing(
        &self,
        commands: &[Arc<CommandDefinition>],
        search: Option<&str>,
        page: usize,
    ) -> Vec<Message> {
        let pages = commands.len().div_ceil(self.per_page).max(1);
        let page = page.clamp(1, pages);
        let (page_text, pages_text, results) = (
            page.to_string(),
            pages.to_string(),
            commands.len().to_string(),
        );

        let header = match search {
            Some(search) => render(
                &self.messages.help_search_header,
                &[
                    ("search", search),
                    ("page", &page_text),
                    ("pages", &pages_text),
                    ("results", &results),
                ],
            ),
            None => render(
                &self.messages.help_header,
                &[
                    ("prefix", &self.prefix),
                    ("page", &page_text),
                    ("pages", &pages_text),
                    ("results", &results),
                ],
            ),
        };

        let mut lines = vec![Message::help(header)];
        lines.extend(
            commands
                .iter()
                .skip((page - 1) * self.per_page)
                .take(self.per_page)
                .map(|command| Message::help(self.entry(command))),
        );

        if page < pages {
            let next = match search {
                Some(search) => format!("{} {}", search, page + 1),
                None => (page + 1).to_string(),
            };
            lines.push(Message::help(render(
                &self.messages.help_footer,
                &[
                    ("prefix", &self.prefix),
                    ("page", &page_text),
                    ("pages", &pages_text),
                    ("next", &next),
                ],
            )));
        }
        lines
    }

    fn entry(&self, command: &CommandDefinition) -> String {
        let description = command.description();
        let separator = if description.is_empty() { "" } else { "-" };
        tidy(&render(
            &self.messages.help_entry,
            &[
                ("prefix", &self.prefix),
                ("command", command.name()),
                ("parameters", &command.syntax()),
                ("separator", separator),
                ("description", description),
            ],
        ))
    }
}

fn matches_term(command: &CommandDefinition, term: &str) -> bool {
    command.keys().any(|key| key.contains(term))
        || command.description().to_lowercase().contains(term)
}

fn parameter_description(param: &ParameterSpec) -> String {
    match &param.description {
        Some(description) => description.clone(),
        None => param.type_id.to_string(),
    }
}

/// Drop empty colour spans and collapse the whitespace they leave behind.
fn tidy(text: &str) -> String {
    EMPTY_TAG
        .replace_all(text, "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declare::DeclarationResolver;
    use crate::issuer::MockIssuer;
    use crate::message::MessageType;
    use crate::resolve::ResolverTable;

    fn registry_with(names: &[(&str, Option<&str>)]) -> CommandRegistry {
        let registry = CommandRegistry::new();
        let resolvers = ResolverTable::with_builtins();
        let declarer = DeclarationResolver::new(&registry, &resolvers);
        for (name, permission) in names {
            let mut decl = CommandDeclaration::new(*name)
                .description(format!("Does {}", name))
                .handler(|_| Ok(()));
            if let Some(permission) = permission {
                decl = decl.permission(*permission);
            }
            declarer.register(decl).unwrap();
        }
        registry
    }

    fn plain(messages: &[Message]) -> Vec<String> {
        messages.iter().map(Message::plain).collect()
    }

    #[test]
    fn listing_hides_forbidden_commands() {
        let registry = registry_with(&[("heal", None), ("ban", Some("perm.ban"))]);
        let issuer = MockIssuer::new("steve");
        let lines = plain(&HelpFormatter::default().page(&registry, &issuer, 1));
        assert_eq!(
            lines,
            vec![
                "=== Showing help for / (1/1, 1 results) ===",
                "/heal - Does heal",
            ]
        );
    }

    #[test]
    fn listing_paginates() {
        let registry = registry_with(&[("a", None), ("b", None), ("c", None)]);
        let issuer = MockIssuer::new("steve");
        let help = HelpFormatter::default().with_per_page(2);

        let first = plain(&help.page(&registry, &issuer, 1));
        assert_eq!(first.len(), 4);
        assert_eq!(first[3], "=== Page 1 of 2, type /help 2 for more ===");

        let second = plain(&help.page(&registry, &issuer, 2));
        assert_eq!(second, vec!["=== Showing help for / (2/2, 3 results) ===", "/c - Does c"]);

        let clamped = plain(&help.page(&registry, &issuer, 9));
        assert_eq!(clamped, second);
    }

    #[test]
    fn search_matches_names_and_descriptions() {
        let registry = registry_with(&[("heal|h", None), ("feed", None)]);
        let issuer = MockIssuer::new("steve");
        let help = HelpFormatter::default();

        let lines = plain(&help.search(&registry, &issuer, &["HEAL"], 1));
        assert_eq!(lines[1], "/heal - Does heal|h");
        assert_eq!(lines.len(), 2);

        let none = help.search(&registry, &issuer, &["teleport"], 1);
        assert_eq!(none[0].kind, MessageType::Error);
        assert_eq!(none[0].plain(), "No commands found matching teleport.");
    }

    #[test]
    fn detailed_lists_parameters() {
        let registry = CommandRegistry::new();
        let resolvers = ResolverTable::with_builtins();
        let def = DeclarationResolver::new(&registry, &resolvers)
            .register(
                CommandDeclaration::new("kick")
                    .param(ParameterSpec::required("target", "string").with_description("Who"))
                    .param(ParameterSpec::flag("silent", "boolean"))
                    .handler(|_| Ok(())),
            )
            .unwrap();
        let lines = plain(&HelpFormatter::default().detailed(&def));
        assert_eq!(
            lines,
            vec!["/kick <target> [--silent]", "<target>: Who", "[--silent]: boolean"]
        );
    }

    #[test]
    fn show_routes_queries() {
        let registry = registry_with(&[("heal", None), ("feed", None)]);
        let help = HelpFormatter::default();
        let mut issuer = MockIssuer::new("steve");

        help.show(&registry, &mut issuer, "heal");
        assert_eq!(issuer.all_texts(), vec!["/heal - Does heal"]);

        issuer.clear();
        help.show(&registry, &mut issuer, "2");
        assert_eq!(issuer.all_texts()[0], "=== Showing help for / (1/1, 2 results) ===");

        issuer.clear();
        help.show(&registry, &mut issuer, "does");
        assert_eq!(issuer.all_texts().len(), 3);
    }

    #[test]
    fn tidy_removes_empty_spans() {
        assert_eq!(tidy("<c1>/ping</c1> <c2></c2> <c3> </c3>"), "<c1>/ping</c1>");
    }
}
