use std::collections::HashMap;

pub struct CliOptions {
    pub scene_name: String,
    pub output: String,
    pub width: u32,
    pub height: u32,
    pub samples_per_edge: u32,
    pub max_depth: u32,
    pub fov_degrees: f64,
    pub damping: f64,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            scene_name: String::from("three_spheres"),
            output: String::from("output.png"),
            width: 640,
            height: 480,
            samples_per_edge: 2,
            max_depth: 2,
            fov_degrees: 45.0,
            damping: 0.9,
        }
    }
}

impl CliOptions {
    pub fn message() -> &'static str {
        r#"
        --scene_name <preset name>
        --output <file.png>
        --width <pixels> --height <pixels>
        --samples_per_edge <n>   (n^2 rays per pixel)
        --max_depth <bounces>
        --fov <degrees>
        --damping <exponent>     (shadow sample damping, default 0.9)
        "#
    }
}

pub fn parse_args(args: Vec<String>) -> Result<CliOptions, String> {
    let mut pairs: HashMap<String, Option<String>> = HashMap::new();
    let mut args = args.into_iter().rev().collect::<Vec<_>>();
    args.pop(); // Removes args[0]

    while let Some(key) = args.pop() {
        if !key.starts_with('-') {
            return Err(format!("Unrecognized key {}", key));
        }
        match args.last() {
            None => {
                pairs.insert(key, None);
            }
            Some(value) => {
                if value.starts_with('-') {
                    pairs.insert(key, None);
                } else {
                    let value = args.pop();
                    pairs.insert(key, value);
                }
            }
        }
    }

    fn required<T: std::str::FromStr>(key: &str, value: Option<String>) -> Result<T, String> {
        value
            .ok_or_else(|| format!("{} needs a value", key))?
            .parse::<T>()
            .map_err(|_| format!("{} has a malformed value", key))
    }

    let mut options = CliOptions::default();
    for (k, v) in pairs.into_iter() {
        match k.as_str() {
            "--scene_name" => options.scene_name = required(&k, v)?,
            "--output" => options.output = required(&k, v)?,
            "--width" => options.width = required(&k, v)?,
            "--height" => options.height = required(&k, v)?,
            "--samples_per_edge" => options.samples_per_edge = required(&k, v)?,
            "--max_depth" => options.max_depth = required(&k, v)?,
            "--fov" => options.fov_degrees = required(&k, v)?,
            "--damping" => options.damping = required(&k, v)?,
            "--help" => {
                println!("usage: {}", CliOptions::message());
            }
            _ => return Err(format!("Unrecognized key {}", k)),
        }
    }
    if options.samples_per_edge == 0 {
        return Err(String::from("--samples_per_edge must be positive"));
    }
    Ok(options)
}
