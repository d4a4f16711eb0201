use clap_complete::Shell;

/// Write the completion script for `shell` to stdout.
pub fn run(shell: Shell, cmd: &mut clap::Command) {
    clap_complete::generate(shell, cmd, "tomato", &mut std::io::stdout());
}
