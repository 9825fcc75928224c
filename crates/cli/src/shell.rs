//! Interactive command shell.
//!
//! Reads one command per line from stdin, dispatches it to the simulator, and prints
//! the result. Malformed commands print an error and the shell keeps going; end of
//! input behaves like `quit`.

use std::io::{self, BufRead, Write};

use mips_pipe_core::Simulator;

const PROMPT: &str = "MU-MIPS SIM:> ";
const RULE: &str = "------------------------------------------------------------------";

/// A parsed shell command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Run until the run flag clears.
    Sim,
    /// Advance the given number of cycles.
    Run(u64),
    /// Reset and reload the program.
    Reset,
    /// Set a general-purpose register.
    Input { reg: usize, value: i32 },
    /// Set HI.
    High(i32),
    /// Set LO.
    Low(i32),
    /// Dump counters, PC, registers, HI, and LO.
    Rdump,
    /// Dump a word range of memory.
    Mdump { start: u32, stop: u32 },
    /// Disassemble the loaded program.
    Print,
    /// Show the pipeline latches.
    Show,
    /// Print performance statistics.
    Stats,
    /// Print the command list.
    Help,
    /// Leave the shell.
    Quit,
}

/// Parses a numeric argument: decimal (optionally negative) or `0x` hexadecimal.
pub fn parse_number(token: &str) -> Result<u32, String> {
    let parsed = match token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => token
            .parse::<u32>()
            .ok()
            .or_else(|| token.parse::<i32>().ok().map(|v| v as u32)),
    };
    parsed.ok_or_else(|| format!("'{token}' is not a number"))
}

/// Parses one input line.
///
/// # Returns
///
/// `Ok(None)` for a blank line, the command, or a message describing the mistake.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();
    let arg = |i: usize| -> Result<u32, String> {
        args.get(i)
            .ok_or_else(|| format!("'{name}' expects {} argument(s)", i + 1))
            .and_then(|t| parse_number(t))
    };

    let cmd = match name.to_ascii_lowercase().as_str() {
        "sim" => Command::Sim,
        "run" => Command::Run(u64::from(arg(0)?)),
        "reset" => Command::Reset,
        "input" => Command::Input {
            reg: arg(0)? as usize,
            value: arg(1)? as i32,
        },
        "high" => Command::High(arg(0)? as i32),
        "low" => Command::Low(arg(0)? as i32),
        "rdump" => Command::Rdump,
        "mdump" => Command::Mdump {
            start: arg(0)?,
            stop: arg(1)?,
        },
        "print" => Command::Print,
        "show" => Command::Show,
        "stats" => Command::Stats,
        "?" | "help" => Command::Help,
        "quit" | "q" => Command::Quit,
        other => return Err(format!("unknown command '{other}' (type ? for help)")),
    };
    Ok(Some(cmd))
}

/// Runs the shell on stdin until `quit` or end of input.
pub fn run(sim: &mut Simulator) {
    print_help();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{PROMPT}");
        let _ = io::stdout().flush();

        let Some(Ok(line)) = lines.next() else {
            break;
        };
        match parse_command(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(cmd)) => {
                if let Err(e) = execute(sim, cmd) {
                    eprintln!("Error: {e}");
                }
            }
            Err(e) => eprintln!("Error: {e}"),
        }
    }
    println!("**************************");
    println!("Exiting MU-MIPS! Good Bye...");
    println!("**************************");
}

/// Executes one command against the simulator.
fn execute(sim: &mut Simulator, cmd: Command) -> Result<(), String> {
    match cmd {
        Command::Sim => {
            if !sim.is_running() {
                println!("Simulation Stopped.\n");
                return Ok(());
            }
            println!("Simulation Started...\n");
            let _ = sim.run_to_completion();
            println!("Simulation Finished.\n");
            report_halt(sim);
        }
        Command::Run(cycles) => {
            if !sim.is_running() {
                println!("Can't simulate, Simulator is not running.\n");
                return Ok(());
            }
            println!("Running simulator for {cycles} cycles...\n");
            let done = sim.run(cycles);
            if done < cycles {
                report_halt(sim);
            }
        }
        Command::Reset => sim.reset().map_err(|e| e.to_string())?,
        Command::Input { reg, value } => sim.set_register(reg, value).map_err(|e| e.to_string())?,
        Command::High(value) => sim.set_hi(value),
        Command::Low(value) => sim.set_lo(value),
        Command::Rdump => print!("{}", sim.register_dump()),
        Command::Mdump { start, stop } => {
            print!("{}", sim.memory_dump(start, stop).map_err(|e| e.to_string())?);
        }
        Command::Print => print!("{}", sim.program_listing()),
        Command::Show => print!("{}", sim.pipeline_dump()),
        Command::Stats => sim.stats().print(),
        Command::Help => print_help(),
        Command::Quit => {}
    }
    Ok(())
}

/// Prints why the simulator stopped and any diagnostics it raised.
fn report_halt(sim: &Simulator) {
    if let Some(reason) = sim.halt_reason() {
        println!("Halted after {} cycles: {reason}", sim.cycle_count());
    }
    for diag in sim.diagnostics() {
        println!("  {diag}");
    }
}

fn print_help() {
    println!("{RULE}\n");
    println!("\t**********MU-MIPS Help MENU**********\n");
    println!("sim\t-- simulate program to completion");
    println!("run <n>\t-- simulate program for <n> cycles");
    println!("rdump\t-- dump register values");
    println!("reset\t-- clears all registers/memory and re-loads the program");
    println!("input <reg> <val>\t-- set GPR <reg> to <val>");
    println!("mdump <start> <stop>\t-- dump memory from <start> to <stop> address");
    println!("high <val>\t-- set the HI register to <val>");
    println!("low <val>\t-- set the LO register to <val>");
    println!("print\t-- print the program loaded into memory");
    println!("show\t-- print the current content of the pipeline registers");
    println!("stats\t-- print performance statistics");
    println!("?\t-- display help menu");
    println!("quit\t-- exit the simulator\n");
    println!("{RULE}\n");
}
