use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Calculate overall 5mC methylation percentage for a genomic region",
    long_about = None,
    after_help = "Examples:\n  regmeth -i sample.bedmethyl -r chr1:14923-15923\n  regmeth -i sample.bedmethyl.gz -r chr1:14923-15923 -v\n  regmeth -i sample.bedmethyl -r chr1:14923-15923 --simple"
)]
pub struct Args {
    #[arg(short, long, required = true, help = "Input bedMethyl file (can be gzipped).")]
    pub input: String,

    #[arg(
        short,
        long,
        required = true,
        help = "Genomic region as chr:start-end, 1-based inclusive coordinates."
    )]
    pub region: String,

    #[arg(short, long, help = "Show loading diagnostics and strand distribution.")]
    pub verbose: bool,

    #[arg(long, help = "Simple output format (just the key numbers).")]
    pub simple: bool,
}
