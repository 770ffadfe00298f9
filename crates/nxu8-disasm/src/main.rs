use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use std::collections::{HashMap, HashSet, VecDeque};
use std::path::Path;

use nxu8_rs::{build_mask, decode, fmt_decoded};

mod analyze;
mod model;
use analyze::{analyze_entries, Block, EdgeKind, EdgeOut, FunctionOut};
use model::{is_mapped, load_raw_bin, range_slice, read_u8, slice_at, Image};

#[derive(Parser, Debug)]
#[command(author, version, about = "nX-U8/100 disassembler CLI", long_about=None)]
struct Cli {
    /// Load address for the binary in target address space
    #[arg(long, default_value_t = 0u32)]
    base: u32,
    /// Skip N bytes at start of file before loading
    #[arg(long, default_value_t = 0usize)]
    skip: usize,
    /// Input binary path
    #[arg(value_name = "BINFILE")]
    input: String,
    /// Limit bytes loaded (default: to EOF after --skip)
    #[arg(long)]
    len: Option<usize>,
    /// Subcommand
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List loaded segments (simple single-segment for raw .bin)
    Sections,
    /// Disassemble a range [start, end) in bytes
    Range {
        /// Start address (hex or dec)
        start: String,
        /// End address (hex or dec, exclusive)
        end: String,
        /// Show instruction bytes
        #[arg(long)]
        show_bytes: bool,
        /// Write output to file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<String>,
    },
    /// Analyze code graph from entry points
    Analyze {
        /// Entry addresses (hex or dec). Repeat flag to add multiple entries.
        #[arg(long = "entry", value_name = "ADDR", num_args = 1.., required = false)]
        entries: Vec<String>,
        /// Maximum instructions to decode before stopping
        #[arg(long, default_value_t = 100_000usize)]
        max_instr: usize,
        /// Output format: text or json
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Emit a linear disassembly listing of analyzed code (text format only)
        #[arg(long)]
        listing: bool,
        /// Show instruction bytes in listing (text format only)
        #[arg(long)]
        show_bytes: bool,
        /// Import labels from JSON (Vec<{ addr, name }>)
        #[arg(long, value_name = "FILE")]
        labels_in: Option<String>,
        /// Export labels to JSON (Vec<{ addr, name }>)
        #[arg(long, value_name = "FILE")]
        labels_out: Option<String>,
        /// Write analysis output to file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<String>,
    },
    /// Dump the signature mask of a range [start, end)
    Sigmask {
        /// Start address (hex or dec)
        start: String,
        /// End address (hex or dec, exclusive)
        end: String,
    },
}

fn parse_u32(s: &str) -> Result<u32> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Ok(u32::from_str_radix(hex, 16)?)
    } else {
        Ok(s.parse::<u32>()?)
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat { Text, Json }

#[derive(Debug, Clone, serde::Serialize)]
struct BlockOut { start: u32, end: u32, insns: Vec<String> }

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct LabelKV { addr: u32, name: String }

#[derive(Debug, Clone, serde::Serialize)]
struct ReportWithLabels {
    entries: Vec<u32>,
    blocks: Vec<BlockOut>,
    edges: Vec<EdgeOut>,
    functions: Vec<FunctionOut>,
    labels: Vec<LabelKV>,
}

/// One listing line for the instruction at `pc`, or None when `pc` is not
/// mapped. Unknown words come back from the decoder as `dw HHHHh` data.
fn render_at(img: &Image, pc: u32, show_bytes: bool) -> Option<(String, u32)> {
    let window = slice_at(img, pc)?;
    match decode(window) {
        Ok(d) => {
            let mut line = format!("{pc:#08x}: ");
            if show_bytes {
                for i in 0..d.size as u32 {
                    line.push_str(&format!("{:02x} ", read_u8(img, pc + i).unwrap_or(0)));
                }
                line.push_str("  ");
            }
            line.push_str(&fmt_decoded(&d));
            Some((line, d.size as u32))
        }
        Err(_) => {
            // a dangling byte at the end of the segment
            let b = read_u8(img, pc)?;
            Some((format!("{pc:#08x}: .byte {b:#04x}"), 1))
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let img = load_raw_bin(Path::new(&cli.input), cli.base, cli.skip, cli.len)?;

    match cli.cmd {
        Command::Sections => {
            println!("{:<10} {:<10} {:<10} {:<6} {:<6}", "name", "start", "end", "perms", "kind");
            for s in &img.segments {
                let start = s.base;
                let end = s.base + (s.bytes.len() as u32);
                println!(
                    "{:<10} {start:#08x} {end:#08x} {:<6} {:<6}",
                    s.name, s.perms, s.kind
                );
            }
        }
        Command::Range { start, end, show_bytes, out } => {
            let start = parse_u32(&start)?;
            let end = parse_u32(&end)?;
            anyhow::ensure!(end >= start, "end must be >= start");

            let mut pc = start;
            let mut buf = String::new();
            use std::fmt::Write as _;
            while pc < end {
                let Some((line, size)) = render_at(&img, pc, show_bytes) else {
                    let _ = writeln!(buf, "{pc:#08x}: <oob>");
                    break;
                };
                let _ = writeln!(buf, "{line}");
                pc = pc.wrapping_add(size);
            }
            if let Some(path) = out { std::fs::write(path, buf)?; } else { print!("{}", buf); }
        }
        Command::Analyze { entries, max_instr, format, listing, show_bytes, labels_in, labels_out, out } => {
            // default seed: start of first segment
            let mut seeds: Vec<u32> = if entries.is_empty() {
                img.segments.first().map(|s| s.base).into_iter().collect()
            } else {
                let mut v = Vec::new();
                for e in entries { v.push(parse_u32(&e)?); }
                v
            };
            seeds.sort_unstable();
            seeds.dedup();
            let (visited, sizes, edges, rets) = analyze_entries(&img, &seeds, max_instr);

            // Compute block starts: entries + all edge destinations
            let mut block_starts: HashSet<u32> = seeds.iter().copied().collect();
            for e in &edges { block_starts.insert(e.to); }

            // Build blocks by linear sweep from each start until next start/unknown
            let mut starts: Vec<u32> = block_starts.into_iter().collect();
            starts.sort_unstable();
            let mut blocks: Vec<Block> = Vec::new();
            let mut addr_to_block: HashMap<u32, u32> = HashMap::new(); // pc -> block start
            for &start in &starts {
                if !visited.contains(&start) { continue; }
                if addr_to_block.contains_key(&start) { continue; }
                let mut cur = start;
                loop {
                    let Some(&sz) = sizes.get(&cur) else { break };
                    let next = cur.wrapping_add(sz as u32);
                    let is_uncond = edges.iter().any(|e| e.from == cur && matches!(e.kind, EdgeKind::Branch));
                    let is_ret = rets.contains(&cur);
                    let should_end = is_uncond || is_ret
                        || !visited.contains(&next)
                        || starts.binary_search(&next).is_ok();
                    if should_end {
                        let end = next;
                        blocks.push(Block { start, end });
                        let mut pc = start;
                        while pc < end {
                            addr_to_block.insert(pc, start);
                            if let Some(&s2) = sizes.get(&pc) { pc = pc.wrapping_add(s2 as u32); } else { break; }
                        }
                        break;
                    } else {
                        cur = next;
                    }
                }
            }

            // Normalize edges to block-level
            let mut edges_out: Vec<EdgeOut> = Vec::new();
            for e in &edges {
                let from_block = *addr_to_block.get(&e.from).unwrap_or(&e.from);
                let to_block = starts.iter().copied().find(|&s| s == e.to).unwrap_or(e.to);
                let kind = match e.kind { EdgeKind::Fallthrough => "ft", EdgeKind::Branch => "br", EdgeKind::CondBranch => "cbr", EdgeKind::Call => "call" }.to_string();
                edges_out.push(EdgeOut { from: from_block, to: to_block, kind });
            }

            // Functions: treat each seed as a root and collect reachable block starts
            let mut functions: Vec<FunctionOut> = Vec::new();
            let mut adj: HashMap<u32, Vec<u32>> = HashMap::new();
            for e in &edges_out { adj.entry(e.from).or_default().push(e.to); }
            for &entry in &seeds {
                let entry_block = starts.iter().copied().find(|&s| s == entry).unwrap_or(entry);
                let mut seen: HashSet<u32> = HashSet::new();
                let mut q = VecDeque::new();
                q.push_back(entry_block);
                while let Some(b) = q.pop_front() {
                    if !seen.insert(b) { continue; }
                    if let Some(nexts) = adj.get(&b) {
                        for &n in nexts { q.push_back(n); }
                    }
                }
                let mut blks: Vec<u32> = seen.into_iter().collect();
                blks.sort_unstable();
                functions.push(FunctionOut { entry: entry_block, blocks: blks });
            }

            // Prepare labels (imported or autogenerated)
            let mut labels: HashMap<u32, String> = HashMap::new();
            if let Some(path) = &labels_in {
                if let Ok(txt) = std::fs::read_to_string(path) {
                    if let Ok(v) = serde_json::from_str::<Vec<LabelKV>>(&txt) {
                        for kv in v { labels.insert(kv.addr, kv.name); }
                    }
                }
            }
            for &e in &seeds { labels.entry(e).or_insert_with(|| format!("sub_{e:06x}")); }
            for b in &blocks { labels.entry(b.start).or_insert_with(|| format!("loc_{:06x}", b.start)); }

            match format {
                OutputFormat::Json => {
                    let report_blocks = enrich_blocks_with_mnemonics(&img, &blocks, show_bytes);
                    if let Some(outp) = &labels_out {
                        let mut arr: Vec<LabelKV> = Vec::new();
                        for (addr, name) in &labels { arr.push(LabelKV { addr: *addr, name: name.clone() }); }
                        let _ = std::fs::write(outp, serde_json::to_string_pretty(&arr).unwrap_or_default());
                    }
                    let mut lbl_vec: Vec<LabelKV> = labels.iter().map(|(k, v)| LabelKV { addr: *k, name: v.clone() }).collect();
                    lbl_vec.sort_by_key(|kv| kv.addr);
                    let report = ReportWithLabels { entries: seeds.clone(), blocks: report_blocks, edges: edges_out, functions, labels: lbl_vec };
                    let json = serde_json::to_string_pretty(&report)?;
                    if let Some(path) = out { std::fs::write(path, json)?; } else { println!("{}", json); }
                }
                OutputFormat::Text => {
                    println!("Analysis summary:");
                    println!("  entries   : {:?}", seeds.iter().map(|a| format!("{a:#08x}")).collect::<Vec<_>>());
                    println!("  insts     : {}", visited.len());
                    println!("  blocks    : {}", blocks.len());
                    println!("  edges     : {}", edges.len());
                    println!("  functions : {}", functions.len());
                    println!("Edges:");
                    for e in &edges_out {
                        println!("  {:#08x} -> {:#08x} ({})", e.from, e.to, e.kind);
                    }
                    if listing {
                        let mut pcs: Vec<u32> = visited.iter().copied().collect();
                        pcs.sort_unstable();
                        println!("\nListing (analyzed PCs):");
                        for pc in pcs {
                            if let Some(lbl) = labels.get(&pc) {
                                println!("{pc:#08x} <{lbl}>:");
                            }
                            if let Some((line, _)) = render_at(&img, pc, show_bytes) {
                                println!("  {line}");
                            }
                        }
                    }
                    if let Some(outp) = &labels_out {
                        let mut arr: Vec<LabelKV> = Vec::new();
                        for (addr, name) in &labels { arr.push(LabelKV { addr: *addr, name: name.clone() }); }
                        let _ = std::fs::write(outp, serde_json::to_string_pretty(&arr).unwrap_or_default());
                    }
                }
            }
        }
        Command::Sigmask { start, end } => {
            let start = parse_u32(&start)?;
            let end = parse_u32(&end)?;
            anyhow::ensure!(end >= start, "end must be >= start");
            anyhow::ensure!(is_mapped(&img, start) || start == end, "start not mapped");
            let Some(bytes) = range_slice(&img, start, end) else {
                anyhow::bail!("range not fully mapped");
            };
            let mask = build_mask(bytes);
            for (row, chunk) in mask.chunks(16).enumerate() {
                let addr = start.wrapping_add((row * 16) as u32);
                print!("{addr:#08x}:");
                for b in chunk { print!(" {b:02x}"); }
                println!();
            }
        }
    }

    Ok(())
}

fn enrich_blocks_with_mnemonics(img: &Image, blocks: &[Block], show_bytes: bool) -> Vec<BlockOut> {
    let mut out = Vec::with_capacity(blocks.len());
    for b in blocks {
        let mut lines = Vec::new();
        let mut pc = b.start;
        while pc < b.end {
            let Some((line, size)) = render_at(img, pc, show_bytes) else { break };
            lines.push(line);
            pc = pc.wrapping_add(size);
        }
        out.push(BlockOut { start: b.start, end: b.end, insns: lines });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{read_u16, Segment};

    #[test]
    fn parse_u32_hex_and_dec() {
        assert_eq!(parse_u32("0x10").unwrap(), 0x10);
        assert_eq!(parse_u32("16").unwrap(), 16);
        assert!(parse_u32("zz").is_err());
    }

    #[test]
    fn render_handles_code_data_and_tails() {
        let seg = Segment {
            name: "s".into(),
            base: 0,
            bytes: vec![0x01, 0x80, 0x1f, 0xf0, 0xaa],
            perms: "r-x",
            kind: "raw",
        };
        let img = Image { segments: vec![seg] };
        let (line, size) = render_at(&img, 0, false).unwrap();
        assert_eq!(size, 2);
        assert!(line.ends_with("add r0, r0"));
        let (line, size) = render_at(&img, 2, false).unwrap();
        assert_eq!(size, 2);
        assert!(line.ends_with("dw f01fh"));
        let (line, size) = render_at(&img, 4, false).unwrap();
        assert_eq!(size, 1);
        assert!(line.ends_with(".byte 0xaa"));
        assert!(render_at(&img, 5, false).is_none());
    }

    #[test]
    fn read_u16_is_little_endian() {
        let seg = Segment { name: "s".into(), base: 0x10, bytes: vec![0x34, 0x12], perms: "r-x", kind: "raw" };
        let img = Image { segments: vec![seg] };
        assert_eq!(read_u16(&img, 0x10), Some(0x1234));
    }
}
