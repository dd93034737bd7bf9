use colored::Colorize;

pub fn print_help() {
    println!("{:━^60}", " CAPTIONER ".yellow());
    println!("Usage:");
    println!("  {} [command] <argument>", "captioner".bold().green());
    println!("\nCommands:");
    println!(
        "  {}   Run the HTTP captioning service (default).",
        "serve".bold().green()
    );
    println!(
        "  {} Caption a local image file with the configured model.",
        "caption".bold().magenta()
    );
    println!(
        "  {}  Display this help message.",
        "-h, -help".bold().blue()
    );
    println!("\nArguments:");
    println!(
        "  {}  Image path, optional language code, optional summary.",
        "caption <image_path> [language] [--summary]".bold().magenta()
    );
    println!("\nEnvironment:");
    println!(
        "  {}  API key; without it every caption is demo text.",
        "GEMINI_API_KEY".bold().cyan()
    );
    println!(
        "  {}  Model name (default gemini-1.5-flash).",
        "GEMINI_MODEL".bold().cyan()
    );
    println!(
        "  {}  Listen address (default 0.0.0.0:8000).",
        "HOST, PORT".bold().cyan()
    );
    println!("\nExamples:");
    println!("  {}", "captioner serve".bold().green());
    println!(
        "  {} photo.jpg fr --summary",
        "captioner caption".bold().magenta()
    );
    println!("{:━^60}", "".yellow());
}
