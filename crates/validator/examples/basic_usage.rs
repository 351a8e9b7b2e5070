//! Basic usage example for ruleval-validator

use ruleval_validator::prelude::*;

record! {
    struct App {
        #[validate = "len:5"]
        version: String,
    }
}

record! {
    struct Service {
        #[validate = "nested"]
        app: App,
        #[validate = "min:1024|max:65535"]
        port: i64,
        #[validate = "in:http,grpc"]
        protocols: Vec<String>,
    }
}

fn main() {
    let service = Service {
        app: App {
            version: "1.0.0".into(),
        },
        port: 80,
        protocols: vec!["http".into(), "ftp".into()],
    };

    match validate(&service) {
        Ok(report) if report.is_valid() => println!("✓ service is valid"),
        Ok(report) => {
            println!("✗ service has {} violation(s):", report.len());
            for violation in &report {
                println!("  - {violation}");
            }
        }
        Err(e) => println!("✗ broken rules: {e}"),
    }

    let strict = Validator::new(ValidatorConfig::strict());
    let empty = Service {
        app: App {
            version: "1.0.0".into(),
        },
        port: 8080,
        protocols: Vec::new(),
    };
    if let Err(e) = strict.validate(&empty) {
        println!("✗ strict mode: {e}");
    }
}
