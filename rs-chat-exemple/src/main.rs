use rs_chat_core::io::read_stdin;
use rs_chat_core::model::chat_input::ChatInput;
use rs_chat_core::model::follower_table::ModelBuilder;
use rs_chat_core::model::generator::Generator;
use rs_chat_core::tokenizer::{TokenConfig, Tokenizer};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Read the whole text from the console (pipe a file in, or type and
    // hit CTRL-d when done)
    eprintln!("READING text from STDIN. Hit ctrl-d when done entering text.");
    let text = read_stdin()?;
    eprintln!("DONE.");

    // Tokenize with the default character sets:
    // stoppers '.', '!', '?' and the usual whitespace separators.
    // Words come out lowercased, reduced to letters and apostrophes.
    let tokenizer = Tokenizer::new(TokenConfig::default());
    let tokens = tokenizer.tokenize(&text);

    // Train the follower table. An empty token stream is rejected here
    // rather than failing later inside generation.
    let builder = ModelBuilder::new(TokenConfig::default())?;
    let table = builder.train(&tokens)?;

    // Generation parameters: at least 30 sentence-terminated lines,
    // wrapped at 70 columns (the defaults)
    let mut input = ChatInput::default();

    // Parameters are validated; a zero width is refused
    match input.set_line_width(0) {
        Ok(_) => println!("Should not happen"),
        Err(_) => eprintln!("A line width of 0 is invalid, keeping 70"),
    }

    // Cap the run at 100k tokens in case the corpus never reaches a
    // stopper at the requested line count
    input.max_tokens = Some(100_000);

    // Generate and print one chat
    let generator = Generator::new(table);
    println!("{}", generator.chat(&input)?);

    Ok(())
}
