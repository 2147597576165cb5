use clap::Parser;
use miette::Result;
use sfr::cli::commands;
use sfr::cli::{init_tracing, load_config, Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior so piping to `head` terminates quietly
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    let config = load_config();
    init_tracing(global.verbose, config.log_level.as_deref());

    match cli.command {
        Commands::Render(args) => commands::render::run(args, &global, &config),
        Commands::Explain(args) => commands::explain::run(args, &global, &config),
        Commands::Renderers => commands::renderers::run(&global, &config),
        Commands::Fill(args) => commands::fill::run(args, &global, &config),
        Commands::Demos => commands::demos::run(&global, &config),
        Commands::Completions(args) => commands::completions::run(args),
    }
}
