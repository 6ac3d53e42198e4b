//! Instruction text sent alongside the photo to the image model.

use super::options::{RestorationOption, RestorationOptions};

/// Role, task, and the four fidelity constraints. Always emitted.
const PREAMBLE: [&str; 7] = [
    "ROLE: You are a forensic image restoration expert specialized in preserving historical accuracy.",
    "TASK: Restore the attached image to high definition while maintaining absolute fidelity to the original subject.",
    "CRITICAL CONSTRAINTS:",
    "1. IDENTITY LOCK: Do NOT alter facial bone structure, eye shape, nose shape, or mouth shape. The output must look EXACTLY like the original person, just clearer.",
    "2. NO HALLUCINATIONS: Do not add make-up, change the age, or alter the facial expression. Do not add objects that are not in the source.",
    "3. TEXTURE PRESERVATION: Keep realistic skin texture (pores, slight imperfections). Do not make the skin look like smooth plastic or wax.",
    "4. STRUCTURAL INTEGRITY: The composition and aspect ratio must remain identical.",
];

pub const TASK_LIST_HEADER: &str = "EXECUTE THE FOLLOWING RESTORATIONS:";

pub const CLOSING_DIRECTIVE: &str = "Return only the restored image.";

/// Task line for a single flag.
pub fn task_line(option: RestorationOption) -> &'static str {
    match option {
        RestorationOption::Colorize => "- COLORIZATION: If the image is B&W, add subtle, realistic colors. Use low saturation for a vintage but restored look. If color exists, correct fading.",
        RestorationOption::Denoise => "- DENOISE: Remove grain and ISO noise without losing fine details.",
        RestorationOption::FixScratches => "- REPAIR: Inpaint scratches, creases, and dust spots seamlessly.",
        RestorationOption::SharpenFace => "- FACE ENHANCEMENT: Apply super-resolution to faces strictly to recover definition lost to blur. Do not reshape features. Focus on sharpening the iris and eyelashes while keeping the original gaze.",
        RestorationOption::Upscale => "- UPSCALE: Increase the apparent resolution and detail density by 2x. Ensure lines are sharp and textures are high-definition. Return a higher resolution image if possible.",
    }
}

/// Compile the restoration instruction for a set of options.
///
/// Pure and deterministic: task lines appear in canonical flag order no matter
/// how the options were toggled. With no flags set, the task list header is
/// followed directly by the closing directive.
pub fn build_restoration_prompt(options: &RestorationOptions) -> String {
    let mut lines: Vec<&str> = PREAMBLE.to_vec();
    lines.push("");
    lines.push(TASK_LIST_HEADER);
    lines.extend(options.enabled().map(task_line));
    lines.push(CLOSING_DIRECTIVE);
    lines.join("\n")
}
