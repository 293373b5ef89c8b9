//! Prints the two form tables so a front end can lay out its inputs.

use healthlog_core::{PROFILE_FORM, RECORD_FORM};

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        let tables = serde_json::json!({
            "profile": PROFILE_FORM,
            "record": RECORD_FORM,
        });
        println!("{}", serde_json::to_string_pretty(&tables)?);
        return Ok(());
    }

    println!("Profile form:");
    for spec in PROFILE_FORM {
        println!("  {:<16} {:<24} {:?}", spec.field.key(), spec.label, spec.input_kind);
    }
    println!();
    println!("Record form:");
    for spec in RECORD_FORM {
        println!("  {:<16} {:<24} {:?}", spec.field.key(), spec.label, spec.input_kind);
    }
    Ok(())
}
