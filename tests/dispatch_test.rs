//! Integration tests for registration and dispatch.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use commando::command::{CommandRegistry, ParameterSpec};
use commando::declare::{CommandDeclaration, DeclarationResolver};
use commando::dispatch::{DispatchOutcome, Dispatcher};
use commando::error::{ArgumentParseError, CommandError};
use commando::issuer::MockIssuer;
use commando::message::MessageType;
use commando::resolve::{ArgumentResolver, Resolved, ResolverTable, TypeId, Value};

fn tokens(line: &str) -> Vec<String> {
    line.split_whitespace().map(String::from).collect()
}

fn register(registry: &CommandRegistry, resolvers: &ResolverTable, decl: CommandDeclaration) {
    DeclarationResolver::new(registry, resolvers)
        .register(decl)
        .unwrap();
}

#[test]
fn heal_scenario() {
    let registry = CommandRegistry::new();
    let resolvers = ResolverTable::with_builtins();
    let received = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&received);
    register(
        &registry,
        &resolvers,
        CommandDeclaration::new("heal")
            .param(ParameterSpec::required("amount", "integer"))
            .handler(move |ctx| {
                let amount = ctx.args.get_i64("amount").unwrap_or_default();
                seen.store(amount as usize, Ordering::SeqCst);
                Ok(())
            }),
    );
    let dispatcher = Dispatcher::new(&registry, &resolvers);
    let mut issuer = MockIssuer::new("steve");

    assert!(dispatcher.dispatch(&tokens("heal 50"), &mut issuer).is_success());
    assert_eq!(received.load(Ordering::SeqCst), 50);

    match dispatcher.dispatch(&tokens("heal abc"), &mut issuer) {
        DispatchOutcome::Failure(CommandError::ArgumentParse(err)) => {
            assert_eq!(err.expected, "integer");
            assert_eq!(err.got.as_deref(), Some("abc"));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }

    match dispatcher.dispatch(&tokens("heel 50"), &mut issuer) {
        DispatchOutcome::Failure(CommandError::UnknownCommand { name }) => {
            assert_eq!(name, "heel")
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

struct TracingResolver(Arc<AtomicUsize>);

impl ArgumentResolver for TracingResolver {
    fn type_id(&self) -> TypeId {
        TypeId::new("speed")
    }

    fn describe(&self) -> &str {
        "speed"
    }

    fn resolve(&self, tokens: &[String]) -> Result<Resolved, ArgumentParseError> {
        self.0.fetch_add(1, Ordering::SeqCst);
        tokens[0]
            .parse::<f64>()
            .map(|v| Resolved::single(Value::Float(v)))
            .map_err(|_| ArgumentParseError::new("speed", tokens[0].as_str()))
    }
}

#[test]
fn fly_permission_checked_before_resolution() {
    let calls = Arc::new(AtomicUsize::new(0));
    let registry = CommandRegistry::new();
    let mut resolvers = ResolverTable::with_builtins();
    resolvers.register(Box::new(TracingResolver(Arc::clone(&calls))));
    register(
        &registry,
        &resolvers,
        CommandDeclaration::new("fly")
            .permission("perm.fly")
            .param(ParameterSpec::required("speed", "speed"))
            .handler(|_| Ok(())),
    );
    let dispatcher = Dispatcher::new(&registry, &resolvers);

    let mut grounded = MockIssuer::new("steve");
    let outcome = dispatcher.dispatch(&tokens("fly 2.5"), &mut grounded);
    assert!(matches!(
        outcome,
        DispatchOutcome::Failure(CommandError::PermissionDenied { .. })
    ));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(
        grounded.texts(MessageType::Error),
        vec!["I'm sorry, but you do not have permission to perform this command."]
    );

    let mut pilot = MockIssuer::new("alex").with_permission("perm.*");
    assert!(dispatcher.dispatch(&tokens("fly 2.5"), &mut pilot).is_success());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn duplicate_names_and_aliases_are_rejected() {
    let registry = CommandRegistry::new();
    let resolvers = ResolverTable::with_builtins();
    let declarer = DeclarationResolver::new(&registry, &resolvers);
    declarer
        .register(CommandDeclaration::new("heal|h").handler(|_| Ok(())))
        .unwrap();

    for names in ["heal", "HEAL", "h", "mend|h"] {
        let err = declarer
            .register(CommandDeclaration::new(names).handler(|_| Ok(())))
            .unwrap_err();
        assert!(
            matches!(err, CommandError::DuplicateCommand { ref existing, .. } if existing == "heal"),
            "{names}: {err}"
        );
    }
    assert!(!registry.contains("mend"));
}

#[test]
fn unregister_removes_name_and_aliases() {
    let registry = CommandRegistry::new();
    let resolvers = ResolverTable::with_builtins();
    register(
        &registry,
        &resolvers,
        CommandDeclaration::new("heal|h|mend").handler(|_| Ok(())),
    );
    let dispatcher = Dispatcher::new(&registry, &resolvers);
    let mut issuer = MockIssuer::new("steve");
    assert!(dispatcher.dispatch(&tokens("mend"), &mut issuer).is_success());

    assert!(registry.unregister("h").is_some());
    for label in ["heal", "h", "mend"] {
        let err = dispatcher.execute(&tokens(label), &mut issuer).unwrap_err();
        assert!(matches!(err, CommandError::UnknownCommand { .. }));
    }
    assert!(registry.unregister("heal").is_none());
}

#[test]
fn dispatch_is_idempotent() {
    let registry = CommandRegistry::new();
    let resolvers = ResolverTable::with_builtins();
    register(
        &registry,
        &resolvers,
        CommandDeclaration::new("heal")
            .param(ParameterSpec::required("amount", "integer"))
            .handler(|_| Ok(())),
    );
    let dispatcher = Dispatcher::new(&registry, &resolvers);
    let mut issuer = MockIssuer::new("steve");

    for line in ["heal 5", "heal", "heal x", "heal 5 6", "feed"] {
        let first = dispatcher.dispatch(&tokens(line), &mut issuer).is_success();
        let second = dispatcher.dispatch(&tokens(line), &mut issuer).is_success();
        assert_eq!(first, second, "{line}");
    }
}

#[test]
fn required_then_optional_token_counts() {
    // For k required and m optional parameters: < k fails, k..=k+m succeeds,
    // > k+m fails.
    for k in 0..3usize {
        for m in 0..3usize {
            let registry = CommandRegistry::new();
            let resolvers = ResolverTable::with_builtins();
            let mut decl = CommandDeclaration::new("cmd").handler(|_| Ok(()));
            for i in 0..k {
                decl = decl.param(ParameterSpec::required(format!("r{i}"), "integer"));
            }
            for i in 0..m {
                decl = decl.param(ParameterSpec::optional(format!("o{i}"), "integer"));
            }
            register(&registry, &resolvers, decl);
            let dispatcher = Dispatcher::new(&registry, &resolvers);
            let mut issuer = MockIssuer::new("steve");

            for supplied in 0..=k + m + 1 {
                let mut input = vec!["cmd".to_string()];
                input.extend((0..supplied).map(|n| n.to_string()));
                let result = dispatcher.execute(&input, &mut issuer);
                let expected_ok = supplied >= k && supplied <= k + m;
                assert_eq!(result.is_ok(), expected_ok, "k={k} m={m} supplied={supplied}");
                if let Err(err) = result {
                    assert!(matches!(err, CommandError::ArgumentParse(_)));
                }
            }
        }
    }
}

#[test]
fn concurrent_dispatch_and_registration() {
    let registry = CommandRegistry::new();
    let resolvers = ResolverTable::with_builtins();
    register(
        &registry,
        &resolvers,
        CommandDeclaration::new("ping").handler(|_| Ok(())),
    );

    std::thread::scope(|scope| {
        for worker in 0..4 {
            let registry = &registry;
            let resolvers = &resolvers;
            scope.spawn(move || {
                let dispatcher = Dispatcher::new(registry, resolvers);
                let mut issuer = MockIssuer::new(format!("worker{worker}"));
                for _ in 0..50 {
                    assert!(dispatcher.dispatch(&tokens("ping"), &mut issuer).is_success());
                }
            });
        }
        scope.spawn(|| {
            let declarer = DeclarationResolver::new(&registry, &resolvers);
            for i in 0..50 {
                declarer
                    .register(CommandDeclaration::new(format!("extra{i}")).handler(|_| Ok(())))
                    .unwrap();
            }
        });
    });

    assert_eq!(registry.len(), 51);
}

#[test]
fn help_command_lists_visible_commands() {
    use commando::help::HelpFormatter;

    let registry = CommandRegistry::new();
    let resolvers = ResolverTable::with_builtins();
    let declarer = DeclarationResolver::new(&registry, &resolvers);
    declarer
        .register(HelpFormatter::default().declaration())
        .unwrap();
    declarer
        .register(
            CommandDeclaration::new("heal|h")
                .description("Heal yourself")
                .param(ParameterSpec::required("amount", "integer"))
                .handler(|_| Ok(())),
        )
        .unwrap();
    declarer
        .register(
            CommandDeclaration::new("ban")
                .permission("perm.ban")
                .description("Ban a player")
                .handler(|_| Ok(())),
        )
        .unwrap();

    let dispatcher = Dispatcher::new(&registry, &resolvers);
    let mut issuer = MockIssuer::new("steve");
    assert!(dispatcher.dispatch(&tokens("help"), &mut issuer).is_success());

    insta::assert_snapshot!(issuer.all_texts().join("\n"), @r"
    === Showing help for / (1/1, 2 results) ===
    /heal <amount> - Heal yourself
    /help [search] [page] - Show help for commands
    ");
}
