//! Interactive console front end.
//!
//! The domain crates return structured results; everything printable lives
//! here. Type `help` at the prompt for the command list.

mod render;

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use chrono::Utc;
use rust_decimal::Decimal;

use stockroom_auth::{Role, UserManager};
use stockroom_core::{DomainError, ItemId, Username};
use stockroom_inventory::{Inventory, Item, ItemPatch, ItemStatus};

fn main() -> anyhow::Result<()> {
    stockroom_observability::init();

    let mut users = UserManager::new();
    seed_users(&mut users)?;
    let mut inventory = Inventory::new();

    println!("stockroom — type 'help' for commands");
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "quit" | "exit") {
            break;
        }

        if let Err(err) = dispatch(line, &mut users, &mut inventory) {
            println!("{}", render::error(&err));
        }
    }

    Ok(())
}

/// Demo accounts, one per role. Plaintext on purpose: this mirrors the
/// modeled system and the credential seam is where hashing would slot in.
fn seed_users(users: &mut UserManager) -> Result<(), DomainError> {
    let now = Utc::now();
    users.register(Username::new("admin"), "admin123", Role::Admin, now)?;
    users.register(Username::new("morgan"), "manager123", Role::Manager, now)?;
    users.register(Username::new("vio"), "viewer123", Role::User, now)?;
    tracing::info!("seeded demo users: admin, morgan, vio");
    Ok(())
}

fn dispatch(
    line: &str,
    users: &mut UserManager,
    inventory: &mut Inventory,
) -> Result<(), DomainError> {
    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();
    let session = users.session();

    match command {
        "help" => println!("{}", render::HELP),
        "register" => {
            let [name, password, role] = take::<3>(&args)?;
            users.register(Username::new(name), password, Role::from_str(role)?, Utc::now())?;
            println!("registered {name}");
        }
        "login" => {
            let [name, password] = take::<2>(&args)?;
            let session = users.login(&Username::new(name), password)?;
            println!("logged in as {} ({})", session.username(), session.role());
        }
        "logout" => {
            let name = users.logout()?;
            println!("logged out from {name}");
        }
        "whoami" => match &session {
            Some(s) => println!("{} ({})", s.username(), s.role()),
            None => println!("no active session"),
        },
        "add" => {
            let [id, name, quantity, price, category] = take::<5>(&args)?;
            let item = Item::new(
                ItemId::new(id),
                name,
                parse_quantity(quantity)?,
                parse_price(price)?,
                category,
                Utc::now(),
            );
            inventory.add_item(session.as_ref(), item)?;
            println!("item {id} added");
        }
        "edit" => {
            let Some((id, fields)) = args.split_first() else {
                return Err(DomainError::validation("usage: edit <id> field=value..."));
            };
            let patch = parse_patch(fields)?;
            let item = inventory.edit_item(session.as_ref(), &ItemId::new(*id), patch, Utc::now())?;
            println!("{}", render::item_line(item));
        }
        "delete" => {
            let [id] = take::<1>(&args)?;
            inventory.delete_item(session.as_ref(), &ItemId::new(id))?;
            println!("item {id} deleted");
        }
        "list" => {
            let items = inventory.list(session.as_ref())?;
            println!("{}", render::item_table(&items, "inventory is empty"));
        }
        "search" => {
            let query = args.join(" ");
            let items = inventory.search(session.as_ref(), &query)?;
            println!("{}", render::item_table(&items, "no items matched your search"));
        }
        other => {
            println!("unknown command '{other}'; try 'help'");
        }
    }

    Ok(())
}

/// Require exactly N positional arguments.
fn take<'a, const N: usize>(args: &[&'a str]) -> Result<[&'a str; N], DomainError> {
    <[&str; N]>::try_from(args).map_err(|_| {
        DomainError::validation(format!("expected {N} argument(s), got {}", args.len()))
    })
}

fn parse_quantity(raw: &str) -> Result<u32, DomainError> {
    raw.parse()
        .map_err(|_| DomainError::validation(format!("bad quantity '{raw}'")))
}

fn parse_price(raw: &str) -> Result<Decimal, DomainError> {
    let price: Decimal = raw
        .trim_start_matches('$')
        .parse()
        .map_err(|_| DomainError::validation(format!("bad price '{raw}'")))?;
    if price.is_sign_negative() {
        return Err(DomainError::validation("price cannot be negative"));
    }
    Ok(price)
}

fn parse_patch(fields: &[&str]) -> Result<ItemPatch, DomainError> {
    let mut patch = ItemPatch::default();
    for field in fields {
        let (key, value) = field
            .split_once('=')
            .ok_or_else(|| DomainError::validation(format!("expected field=value, got '{field}'")))?;
        match key {
            "name" => patch.name = Some(value.to_string()),
            "qty" | "quantity" => patch.quantity = Some(parse_quantity(value)?),
            "price" => patch.price = Some(parse_price(value)?),
            "category" => patch.category = Some(value.to_string()),
            "status" => patch.status = Some(ItemStatus::from_str(value)?),
            other => {
                return Err(DomainError::validation(format!("unknown field '{other}'")));
            }
        }
    }
    Ok(patch)
}
