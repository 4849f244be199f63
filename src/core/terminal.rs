use console::{Emoji, style};

pub static SUCCESS_ICON: Emoji<'_, '_> = Emoji("✅ ", "");
pub static INFO_ICON: Emoji<'_, '_> = Emoji("ℹ️  ", "");
pub static WARN_ICON: Emoji<'_, '_> = Emoji("⚠️  ", "");
pub static ERROR_ICON: Emoji<'_, '_> = Emoji("❌ ", "");
pub static GEAR: Emoji<'_, '_> = Emoji("⚙️  ", "");
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");
pub static PENCIL: Emoji<'_, '_> = Emoji("📝 ", "");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "");

pub fn print_step(step: &str) {
    println!("{} {}", SPARKLE, style(step).bold());
}

pub fn print_success(msg: &str) {
    println!("{} {}", SUCCESS_ICON, style(msg).green());
}

pub fn print_info(msg: &str) {
    println!("{} {}", INFO_ICON, style(msg).blue());
}

pub fn print_warn(msg: &str) {
    println!("{} {}", WARN_ICON, style(msg).yellow());
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", ERROR_ICON, style(msg).red().bold());
}

pub fn print_status(label: &str, msg: &str) {
    println!("  {} {}: {}", GEAR, style(label).bold().cyan(), msg);
}

/// Titled block of help or status lines with a dim rule, so sections
/// stay visually separate in longer command output.
pub struct GuideSection {
    title: String,
    lines: Vec<String>,
}

const SECTION_WIDTH: usize = 58;

impl GuideSection {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            lines: Vec::new(),
        }
    }

    pub fn command(mut self, command: &str, description: &str) -> Self {
        self.lines.push(format!(
            "  {} {}",
            style(format!("{:<12}", command)).green().bold(),
            description
        ));
        self
    }

    pub fn status(mut self, label: &str, value: &str) -> Self {
        self.lines.push(format!(
            "  {} {}",
            style(format!("{:<16}", format!("{}:", label))).bold().cyan(),
            value
        ));
        self
    }

    pub fn text(mut self, line: &str) -> Self {
        self.lines.push(format!("  {}", line));
        self
    }

    pub fn info(mut self, line: &str) -> Self {
        self.lines.push(format!("  {}{}", INFO_ICON, line));
        self
    }

    pub fn warn(mut self, line: &str) -> Self {
        self.lines
            .push(format!("  {}{}", WARN_ICON, style(line).yellow()));
        self
    }

    pub fn hint(mut self, example: &str, note: &str) -> Self {
        let mut line = format!("  {}", style(example).cyan());
        if !note.is_empty() {
            line.push_str(&format!("  {}", style(note).dim()));
        }
        self.lines.push(line);
        self
    }

    pub fn blank(mut self) -> Self {
        self.lines.push(String::new());
        self
    }

    pub fn print(self) {
        let title = format!(" {} ", self.title);
        let tail = SECTION_WIDTH.saturating_sub(title.chars().count() + 2);
        println!(
            "\n {}{}{}",
            style("──").dim(),
            style(&title).bold(),
            style("─".repeat(tail)).dim()
        );
        for line in self.lines {
            println!("{}", line);
        }
    }
}

pub fn print_banner() {
    let lines: &[&str] = &[
        "                    _                       __  _    ",
        " _ __   ___  ___ | |_   ___  _ __   __ _  / _|| |_   ",
        "| '_ \\ / _ \\ / __|| __| / __|| '__/ _` || |_ | __|  ",
        "| |_) | (_) |\\__ \\| |_ | (__ | |  | (_| ||  _|| |_  ",
        "| .__/ \\___/ |___/ \\__| \\___||_|   \\__,_||_|   \\__| ",
        "|_|                                                  ",
    ];

    // Gradient: #f472b6 → #a78bfa → #60a5fa (diagonal top-left → bottom-right)
    let stops: [(u8, u8, u8); 3] = [(244, 114, 182), (167, 139, 250), (96, 165, 250)];
    let max_w = 53u32;
    let max_d = max_w + 5 * 10;

    println!();
    for (y, line) in lines.iter().enumerate() {
        for (x, ch) in line.chars().enumerate() {
            if ch == ' ' {
                print!(" ");
                continue;
            }
            let d = ((x as u32 + y as u32 * 10) * 1000 / max_d).min(1000);
            let (r, g, b) = if d <= 500 {
                let t = d * 2;
                lerp_color(stops[0], stops[1], t)
            } else {
                let t = (d - 500) * 2;
                lerp_color(stops[1], stops[2], t)
            };
            print!("\x1b[38;2;{};{};{}m{}", r, g, b, ch);
        }
        println!();
    }
    print!("\x1b[0m");

    println!("\x1b[38;2;96;165;250mSocial content, drafted in seconds.\x1b[0m\n");
}

fn lerp_color(a: (u8, u8, u8), b: (u8, u8, u8), t: u32) -> (u8, u8, u8) {
    let r = (a.0 as u32 * (1000 - t) + b.0 as u32 * t) / 1000;
    let g = (a.1 as u32 * (1000 - t) + b.1 as u32 * t) / 1000;
    let b_val = (a.2 as u32 * (1000 - t) + b.2 as u32 * t) / 1000;
    (r as u8, g as u8, b_val as u8)
}

pub fn print_goodbye() {
    println!(
        "\n{} {}",
        SPARKLE,
        style("Thanks for creating with postcraft. See you next time!")
            .bold()
            .cyan()
    );
}
