//! Library integration tests.

use commando::CommandError;

#[test]
fn error_types_are_public() {
    let err = CommandError::UnknownCommand {
        name: "heel".into(),
    };
    assert!(err.to_string().contains("heel"));
    assert!(err.is_dispatch_error());
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> commando::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use commando::cli::{Cli, Commands};

    let cli = Cli::parse_from(["commando", "list", "--json"]);

    if let Some(Commands::List(args)) = cli.command {
        assert!(args.json);
    } else {
        panic!("Expected List command");
    }
}

#[test]
fn console_host_is_usable_from_outside() {
    use commando::command::ParameterSpec;
    use commando::console::{ConsoleHost, ConsoleIssuer};
    use commando::declare::CommandDeclaration;
    use commando::resolve::{FnResolver, Value};

    let mut host = ConsoleHost::new();
    host.resolvers_mut().register(Box::new(
        FnResolver::new("direction", "north, south, east or west", |token| {
            matches!(token, "north" | "south" | "east" | "west")
                .then(|| Value::String(token.to_string()))
        })
        .with_suggestions(["north", "south", "east", "west"]),
    ));
    host.register(
        CommandDeclaration::new("go")
            .param(ParameterSpec::required("to", "direction"))
            .handler(|ctx| {
                let to = ctx.args.get_str("to").unwrap_or_default().to_string();
                ctx.reply(format!("Walking {}", to));
                Ok(())
            }),
    )
    .unwrap();

    let mut issuer = ConsoleIssuer::new("console", Vec::new());
    assert_eq!(host.complete("/go s", &issuer), vec!["south"]);
    host.execute_line("/go north", &mut issuer);
    host.execute_line("/go up", &mut issuer);
    let out = String::from_utf8(issuer.into_inner()).unwrap();
    assert_eq!(
        out,
        "Walking north\n\
         Error: Expected north, south, east or west for <to>, got 'up'\n\
         Usage: /go <to>\n"
    );
}
