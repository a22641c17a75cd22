
use clap::Parser;
use clap::Subcommand;

use crate::errors::CommandError;
use crate::progress::ProgressObserver;

mod write;
mod show;
mod docs;

use write::Write;
use show::Show;
use docs::Docs;


pub(crate) trait Task {

    fn run<Progress: ProgressObserver>(self, progress: &mut Progress) -> Result<(),CommandError>;

}

#[macro_export]
macro_rules! command_def {
    ($struct_name: ident {$($command_name: ident),*}) => {

        #[derive(Subcommand)]
        pub(crate) enum $struct_name {
            $(
                $command_name($command_name)
            ),*
        }

        impl Task for $struct_name {

            fn run<Progress: ProgressObserver>(self, progress: &mut Progress) -> Result<(),CommandError> {
                match self {
                    $(Self::$command_name(a) => a.run(progress)),*
                }
            }

        }
    };
}

#[macro_export]
macro_rules! subcommand_def {
    ($(#[$attribute: meta])* $visibility: vis struct $struct_name: ident $body: tt) => {

        #[derive(Args)]
        $(#[$attribute])*
        $visibility struct $struct_name $body

    };
}

command_def!{
    MainCommand {
        Write,
        Show,
        Docs
    }
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Generates JSON Schema documents, with hypermedia links, from model and route metadata.
pub(crate) struct SchemaBuilder {
    #[command(subcommand)]
    command: MainCommand
}

impl Task for SchemaBuilder {

    fn run<Progress: ProgressObserver>(self, progress: &mut Progress) -> Result<(),CommandError> {
        self.command.run(progress)
    }
}
