use clap::Args;
use gdts_core::{map_api_type, map_godot_type};

#[derive(Args, Debug, Clone)]
pub struct MapTypeArgs {
    #[arg(value_name = "DESCRIPTOR", required = true, help = "Godot type descriptors to map")]
    pub descriptors: Vec<String>,
    #[arg(
        long = "api-format",
        help = "Accept extension_api.json decorations such as typedarray:: and enum::"
    )]
    pub api_format: bool,
}

pub fn run(args: &MapTypeArgs) -> i32 {
    for line in map_all(args) {
        println!("{line}");
    }
    0
}

fn map_all(args: &MapTypeArgs) -> Vec<String> {
    args.descriptors
        .iter()
        .map(|descriptor| {
            if args.api_format {
                map_api_type(descriptor)
            } else {
                map_godot_type(descriptor)
            }
        })
        .collect()
}
