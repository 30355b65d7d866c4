use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "cvtext")]
#[command(version)]
#[command(about = "Extract plain text from resume documents", long_about = None)]
#[command(after_help = "Examples:\n  \
  cvtext resume.docx                 print the resume text to stdout\n  \
  cvtext resume.docx -o resume.txt   write the extracted text to a file\n  \
  cvtext -v resume.docx              list the entries inside the container")]
pub struct Cli {
    /// Document file to read (.docx, .txt; .doc via best-effort recovery)
    #[arg(value_name = "FILE")]
    pub file: String,

    /// Write the extracted text to a file instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<String>,

    /// Declared media type, overriding extension-based detection
    #[arg(long = "media-type", value_name = "TYPE")]
    pub media_type: Option<String>,

    /// Fail when the text could only be recovered heuristically
    #[arg(long)]
    pub strict: bool,

    /// List container entries (short format)
    #[arg(short = 'l')]
    pub list: bool,

    /// List container entries verbosely
    #[arg(short = 'v')]
    pub verbose: bool,

    /// Quiet mode (-qq => quieter)
    #[arg(short = 'q', action = clap::ArgAction::Count)]
    pub quiet: u8,
}

impl Cli {
    pub fn is_quiet(&self) -> bool {
        self.quiet > 0
    }

    pub fn is_very_quiet(&self) -> bool {
        self.quiet > 1
    }
}
