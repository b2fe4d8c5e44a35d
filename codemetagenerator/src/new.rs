use std::io::{BufRead, Write};

use anyhow::{bail, Result};
use codemeta_core::model::{self, DevelopmentStatus};
use serde_json::Value;

use crate::licenses::LicenseCatalog;
use crate::prompt::{check_url, Prompter};
use crate::store::Store;

const NEXT_STEPS: &[&str] = &[
    "To add authors, contributors or keywords, run the following commands:",
    "\tcodemetagenerator add author",
    "\tcodemetagenerator add contributor",
    "\tcodemetagenerator add keyword <KEYWORD>...",
    "To remove or change any key in the in-progress codemeta.json file, run:",
    "\tcodemetagenerator delete <PATH>",
    "\tcodemetagenerator set <PATH> <VALUE>",
    "To generate the final codemeta.json file, run the following command:",
    "\tcodemetagenerator generate [-o|--output <PATH>]",
];

/// Run the `new` command: interview the user and start a fresh in-progress
/// document, replacing any previous one.
pub(crate) fn new<R: BufRead, W: Write>(
    store: &Store,
    catalog: &LicenseCatalog,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    store.clear_in_progress()?;

    let identifier = prompter.ask("Enter a unique identifier for your software source code")?;
    let name = prompter.ask("Enter a name for your software source code")?;
    let description = prompter.ask("Enter a description for your software source code")?;

    let statuses: Vec<&str> = DevelopmentStatus::ALL
        .iter()
        .map(|status| status.name())
        .collect();
    let status = DevelopmentStatus::ALL[prompter.select(
        "Select a development status from the list below (see: https://www.repostatus.org/)",
        &statuses,
    )?];

    let code_repository = prompter.ask_validated(
        "Enter the URL of the code repository for the project",
        check_url,
    )?;
    let language_name =
        prompter.ask("Enter the name of the programming language of the project")?;
    let language_url = prompter.ask_validated(
        "Enter the URL of the programming language of the project",
        check_url,
    )?;
    let runtime_platform = prompter.ask("Enter the name of the runtime platform of the project")?;
    let version = prompter.ask("Enter the version of the project")?;
    let license_id = prompter.ask_validated(
        "Enter the SPDX license ID for the project (see: https://spdx.org/licenses/)",
        |id| {
            if !catalog.contains(id) {
                bail!(
                    "invalid or unrecognized license ID: {}. See: https://spdx.org/licenses/",
                    id
                );
            }
            Ok(())
        },
    )?;
    let readme = prompter.ask_validated(
        "Enter the URL of the README file for the project",
        check_url,
    )?;
    let maintainer = prompter.person_or_organization("Maintainer")?;

    let license = catalog.reference(&license_id).unwrap_or_default();
    let mut fields = vec![
        (model::IDENTIFIER, Value::from(identifier)),
        (model::NAME, Value::from(name)),
        (model::DESCRIPTION, Value::from(description)),
        (model::VERSION, Value::from(version)),
        (model::MAINTAINER, maintainer),
    ];
    if !language_name.is_empty() || !language_url.is_empty() {
        fields.push((
            model::PROGRAMMING_LANGUAGE,
            model::programming_language(&language_name, &language_url),
        ));
    }
    fields.extend([
        (model::DEVELOPMENT_STATUS, Value::from(status.name())),
        (model::LICENSE, Value::from(license)),
        (model::RUNTIME_PLATFORM, Value::from(runtime_platform)),
        (model::CODE_REPOSITORY, Value::from(code_repository)),
        (model::README, Value::from(readme)),
    ]);

    let document = model::codemeta(
        fields
            .into_iter()
            .map(|(key, value)| (key.to_string(), value)),
    );
    store.persist(&document)?;

    prompter.say("Successfully created a new in-progress codemeta.json file.")?;
    for line in NEXT_STEPS {
        prompter.say(line)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::licenses::tests::SPDX_SAMPLE;
    use serde_json::json;
    use std::io::Cursor;

    fn run(store: &Store, script: &str) -> Result<String> {
        let catalog = LicenseCatalog::from_spdx(SPDX_SAMPLE.as_bytes()).unwrap();
        let mut prompter = Prompter::new(Cursor::new(script.as_bytes().to_vec()), Vec::new(), false);
        new(store, &catalog, &mut prompter)?;
        Ok(String::from_utf8(prompter.into_output()).unwrap())
    }

    const SCRIPT: &str = "\
codemetagenerator
codemetagenerator
Generate codemeta.json files
active
https://github.com/example/codemetagenerator
Rust
https://www.rust-lang.org
Linux
0.1.0
MIT
https://github.com/example/codemetagenerator/README.md
1
Jane
Doe
jane@example.org
https://orcid.org/0000-0002-1825-0097
";

    #[test]
    fn test_new_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());
        let output = run(&store, SCRIPT).unwrap();
        assert!(output.contains("Successfully created"));

        let document = store.load().unwrap();
        assert_eq!(
            serde_json::Value::Object(document.clone()),
            json!({
                "@context": "https://doi.org/10.5063/schema/codemeta-2.0",
                "@type": "SoftwareSourceCode",
                "identifier": "codemetagenerator",
                "name": "codemetagenerator",
                "description": "Generate codemeta.json files",
                "version": "0.1.0",
                "maintainer": {
                    "@type": "Person",
                    "givenName": "Jane",
                    "familyName": "Doe",
                    "email": "jane@example.org",
                    "@id": "https://orcid.org/0000-0002-1825-0097"
                },
                "programmingLanguage": {
                    "@type": "ComputerLanguage",
                    "name": "Rust",
                    "url": "https://www.rust-lang.org"
                },
                "developmentStatus": "Active",
                "license": "https://spdx.org/licenses/MIT.html",
                "runtimePlatform": "Linux",
                "codeRepository": "https://github.com/example/codemetagenerator",
                "readme": "https://github.com/example/codemetagenerator/README.md"
            })
        );
        assert_eq!(
            codemeta_schema::validate(&serde_json::Value::Object(document)),
            Ok(())
        );
    }

    #[test]
    fn test_optional_answers_left_out() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());
        let script = "\nminimal\n\nWIP\n\n\n\n\n\n\n\n2\nACME\n\n\n";
        run(&store, script).unwrap();
        assert_eq!(
            serde_json::Value::Object(store.load().unwrap()),
            json!({
                "@context": "https://doi.org/10.5063/schema/codemeta-2.0",
                "@type": "SoftwareSourceCode",
                "name": "minimal",
                "maintainer": {"@type": "Organization", "name": "ACME"},
                "developmentStatus": "WIP"
            })
        );
    }

    #[test]
    fn test_unknown_license_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());
        let script = SCRIPT.replace("\nMIT\n", "\nNOT-A-LICENSE\n");
        let err = run(&store, &script).unwrap_err();
        assert!(err.to_string().contains("NOT-A-LICENSE"));
        assert!(store.load().is_err());
    }

    #[test]
    fn test_replaces_previous_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());
        store
            .persist(&model::codemeta(vec![(model::NAME.to_string(), json!("old"))]))
            .unwrap();
        // bail out at the first question
        assert!(run(&store, "").is_err());
        assert!(store.load().is_err());
    }
}
