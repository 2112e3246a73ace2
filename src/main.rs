//! Demonstration harness: reads three counts N K M from stdin, then N
//! `key value` inserts, K removal keys, and M search keys, reporting one
//! status line per insert and per search.

use arena_skiplist::SkipList;
use std::io::{self, Read};
use std::process;

fn next_int<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> i64 {
    match tokens.next().map(str::parse) {
        Some(Ok(n)) => n,
        _ => {
            eprintln!("malformed input: expected an integer");
            process::exit(1);
        }
    }
}

fn main() -> io::Result<()> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    let mut tokens = input.split_ascii_whitespace();

    let inserts = next_int(&mut tokens);
    let removals = next_int(&mut tokens);
    let searches = next_int(&mut tokens);

    let mut sk = SkipList::new(16);

    for _ in 0..inserts {
        let key = next_int(&mut tokens);
        let value = next_int(&mut tokens);
        if sk.insert(key, value) {
            println!("Insert Success");
        } else {
            println!("Insert Failed");
        }
    }
    for _ in 0..removals {
        let key = next_int(&mut tokens);
        sk.remove(&key);
    }
    for _ in 0..searches {
        let key = next_int(&mut tokens);
        if sk.contains(&key) {
            println!("Search Success");
        } else {
            println!("Search Failed");
        }
    }
    Ok(())
}
