/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Charge une page de leçon décrite en JSON, y applique les actions
//! demandées puis affiche le document obtenu en HTML.
//!
//! Les actions s'exécutent dans cet ordre : les montages (`--mount`),
//! les rétablissements globaux (`--reset-all`), puis les rétablissements
//! ciblés (`--reset`), chacun dans l'ordre de la ligne de commande.

use std::{error::Error, fs, path::PathBuf, process};

use clap::Parser;
use dom::{
    custom_elements::CustomElementRegistry,
    node::{DocumentNode, ElementNode},
    serializer::serialize_node,
};
use lessons::{
    fixture::{find_element_by_id_composed, PageFixture},
    reset_all_sizes, reset_size_for, TemplateRegistrar,
};

#[derive(Parser)]
#[command(name = "atelier")]
#[command(about = "Monte les gabarits d'une page de leçon et rétablit la \
                   taille des blocs redimensionnés")]
struct Cli {
    /// Page de leçon (JSON)
    page: PathBuf,

    /// Monte le gabarit portant cet identifiant comme élément
    /// personnalisé
    #[arg(long = "mount", value_name = "TEMPLATE_ID")]
    mounts: Vec<String>,

    /// Rétablit la taille du `.fake-body` de l'arbre du déclencheur et de
    /// ses `div` redimensionnables
    #[arg(long = "reset-all", value_name = "TRIGGER_ID")]
    reset_all: Vec<String>,

    /// Rétablit la taille du premier élément correspondant au sélecteur,
    /// dans l'arbre du déclencheur
    #[arg(long = "reset", num_args = 2, value_names = ["TRIGGER_ID", "SELECTOR"])]
    reset: Vec<String>,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match run(&cli) {
        | Ok(html) => println!("{html}"),
        | Err(err) => {
            eprintln!("Erreur : {err}");
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<String, Box<dyn Error>> {
    let source = fs::read_to_string(&cli.page).map_err(|err| {
        format!("lecture de « {} » impossible : {err}", cli.page.display())
    })?;
    let document = PageFixture::from_json(&source)?.build()?;

    let registry = CustomElementRegistry::new();
    let registrar = TemplateRegistrar::new(document, &registry);
    for template_id in cli.mounts.iter() {
        registrar.register_and_mount(template_id)?;
    }

    // Les éléments de la page qui portent déjà le nom d'un gabarit monté
    // sont construits à leur tour.
    let document = registrar.document();
    if !registry.is_empty() {
        let upgraded = registry.upgrade(document);
        log::info!(
            "{} gabarit(s) monté(s), {upgraded} élément(s) de la page mis à \
             niveau",
            registry.len()
        );
    }

    for trigger_id in cli.reset_all.iter() {
        let trigger = find_trigger(document, trigger_id)?;
        let count = reset_all_sizes(&trigger);
        log::info!("« {trigger_id} » : {count} élément(s) rétabli(s)");
    }

    for pair in cli.reset.chunks(2) {
        let [trigger_id, selector] = pair else {
            continue;
        };
        let trigger = find_trigger(document, trigger_id)?;
        if !reset_size_for(&trigger, selector)? {
            log::info!("« {selector} » : aucun élément dans la portée");
        }
    }

    Ok(serialize_node(document))
}

fn find_trigger(
    document: &DocumentNode,
    trigger_id: &str,
) -> Result<ElementNode, String> {
    find_element_by_id_composed(document, trigger_id)
        .ok_or_else(|| format!("déclencheur « {trigger_id} » introuvable"))
}
